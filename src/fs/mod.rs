//! File System Module
//!
//! The virtual node tree shared by the explorer and the shell:
//! - TreeStore: hierarchical store with CRUD, move/copy, search and statistics
//! - SnapshotStore: whole-tree persistence backends
//! - defaults: the initial explorer and shell trees

pub mod defaults;
pub mod snapshot;
pub mod tree_store;
pub mod types;

pub use defaults::{explorer_tree, shell_tree, EXPLORER_ROOT_ID, SHELL_ROOT_ID};
pub use snapshot::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore, SNAPSHOT_KEY};
pub use tree_store::TreeStore;
pub use types::*;
