//! File System Types
//!
//! Core types for the virtual node tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tree store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("ENOENT: no such node '{id}'")]
    NotFound { id: String },

    #[error("ENOTDIR: not a directory '{id}'")]
    NotADirectory { id: String },

    #[error("EISDIR: not a file '{id}'")]
    NotAFile { id: String },

    #[error("EPERM: the root directory cannot be deleted")]
    RootDeletionForbidden,

    #[error("EPERM: the root directory cannot be moved")]
    RootMoveForbidden,

    #[error("EINVAL: cannot place '{id}' inside its own subtree at '{destination}'")]
    CycleDetected { id: String, destination: String },

    #[error("ENOENT: parent of '{id}' not found")]
    ParentNotFound { id: String },

    #[error("EIO: snapshot persistence failed: {message}")]
    Persistence { message: String },

    #[error("EINVAL: invalid snapshot: {message}")]
    InvalidSnapshot { message: String },
}

/// Node kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

impl NodeKind {
    /// Prefix used when generating ids for nodes of this kind
    pub fn id_prefix(&self) -> &'static str {
        match self {
            NodeKind::Directory => "folder",
            NodeKind::File => "file",
        }
    }
}

/// Payload of a node. A directory owns children, a file owns content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeEntry {
    #[serde(rename = "folder", alias = "directory")]
    Directory {
        #[serde(default)]
        children: Vec<Node>,
    },
    File {
        #[serde(default)]
        content: String,
    },
}

/// A file or directory in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub entry: NodeEntry,
}

impl Node {
    /// Create an empty directory node
    pub fn directory(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            entry: NodeEntry::Directory { children: Vec::new() },
        }
    }

    /// Create a file node
    pub fn file(id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            entry: NodeEntry::File { content: content.into() },
        }
    }

    /// Builder-style helper used to assemble default trees
    pub fn with_children(mut self, nodes: Vec<Node>) -> Self {
        if let NodeEntry::Directory { children } = &mut self.entry {
            children.extend(nodes);
        }
        self
    }

    pub fn kind(&self) -> NodeKind {
        match self.entry {
            NodeEntry::Directory { .. } => NodeKind::Directory,
            NodeEntry::File { .. } => NodeKind::File,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.entry, NodeEntry::Directory { .. })
    }

    pub fn is_file(&self) -> bool {
        matches!(self.entry, NodeEntry::File { .. })
    }

    /// Children of a directory; empty for files
    pub fn children(&self) -> &[Node] {
        match &self.entry {
            NodeEntry::Directory { children } => children,
            NodeEntry::File { .. } => &[],
        }
    }

    /// Content of a file; `None` for directories
    pub fn content(&self) -> Option<&str> {
        match &self.entry {
            NodeEntry::File { content } => Some(content),
            NodeEntry::Directory { .. } => None,
        }
    }

    /// First child carrying the given name
    pub fn child_named(&self, name: &str) -> Option<&Node> {
        self.children().iter().find(|c| c.name == name)
    }

    /// Number of nodes in the subtree rooted here, including self
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children());
        }
        count
    }
}

/// Aggregate tree statistics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Directories, excluding the root
    pub folders: usize,
    pub files: usize,
    /// Sum of file content lengths in characters
    pub size: usize,
    /// Time of the call, not of the last mutation
    pub last_updated: DateTime<Utc>,
}

/// Result of a move; parents are reported by id and must be re-resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveOutcome {
    pub item: Node,
    pub from_parent: String,
    pub to_parent: String,
}

/// Kind of tree mutation recorded in the changelog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Created,
    Renamed,
    Edited,
    Deleted,
    Moved,
    Copied,
    Reset,
}

/// Changelog entry emitted by every mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEvent {
    pub kind: MutationKind,
    pub id: String,
}
