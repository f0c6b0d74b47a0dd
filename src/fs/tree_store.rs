//! Tree Store
//!
//! Owns the node hierarchy and performs every mutation on it. Callers hold
//! ids, never node handles, across operations: borrows returned by lookups
//! end before the next mutation.

use std::collections::HashSet;

use chrono::Utc;
use rand::Rng;
use tracing::{debug, warn};

use super::snapshot::SnapshotStore;
use super::types::*;

const ID_SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 6;

/// Generates `<prefix>_<millis>_<sequence><suffix>` ids.
#[derive(Debug, Default)]
struct IdGenerator {
    sequence: u64,
}

impl IdGenerator {
    fn next(&mut self, prefix: &str) -> String {
        self.sequence += 1;
        let mut rng = rand::thread_rng();
        let suffix: String = (0..ID_SUFFIX_LEN)
            .map(|_| ID_SUFFIX_ALPHABET[rng.gen_range(0..ID_SUFFIX_ALPHABET.len())] as char)
            .collect();
        format!(
            "{}_{}_{:x}{}",
            prefix,
            Utc::now().timestamp_millis(),
            self.sequence,
            suffix
        )
    }
}

struct Persistence {
    store: Box<dyn SnapshotStore>,
    key: String,
}

/// Mutable tree of nodes with a single, fixed root.
pub struct TreeStore {
    root: Node,
    initial: Node,
    persistence: Option<Persistence>,
    ids: IdGenerator,
    events: Vec<TreeEvent>,
    last_persist_error: Option<FsError>,
}

impl TreeStore {
    /// Create a store over `root` without persistence.
    pub fn new(root: Node) -> Self {
        Self {
            initial: root.clone(),
            root,
            persistence: None,
            ids: IdGenerator::default(),
            events: Vec::new(),
            last_persist_error: None,
        }
    }

    /// Create a store backed by a snapshot. The saved tree under `key` is
    /// loaded if present and valid, otherwise `default_root` is used.
    pub fn open(default_root: Node, store: Box<dyn SnapshotStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let root = match store.load(&key) {
            Ok(Some(blob)) => match parse_snapshot(&blob) {
                Ok(root) => root,
                Err(e) => {
                    warn!(key = %key, error = %e, "discarding snapshot, using default tree");
                    default_root.clone()
                }
            },
            Ok(None) => default_root.clone(),
            Err(e) => {
                warn!(key = %key, error = %e, "snapshot unreadable, using default tree");
                default_root.clone()
            }
        };

        Self {
            root,
            initial: default_root,
            persistence: Some(Persistence { store, key }),
            ids: IdGenerator::default(),
            events: Vec::new(),
            last_persist_error: None,
        }
    }

    /// The whole tree.
    pub fn file_system(&self) -> &Node {
        &self.root
    }

    pub fn root_id(&self) -> &str {
        &self.root.id
    }

    /// Depth-first lookup by id.
    pub fn get(&self, id: &str) -> Option<&Node> {
        find(&self.root, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Direct parent of `id`; `None` for the root or an unknown id.
    pub fn parent_of(&self, id: &str) -> Option<&Node> {
        find_parent(&self.root, id)
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.root.subtree_len()
    }

    /// Most recent snapshot failure, cleared by the next successful save.
    pub fn last_persist_error(&self) -> Option<&FsError> {
        self.last_persist_error.as_ref()
    }

    /// Mutations recorded since the previous call.
    pub fn drain_events(&mut self) -> Vec<TreeEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn create_directory(&mut self, parent_id: &str, name: &str) -> Result<Node, FsError> {
        self.insert_new(parent_id, name, NodeEntry::Directory { children: Vec::new() })
    }

    pub fn create_file(&mut self, parent_id: &str, name: &str, content: &str) -> Result<Node, FsError> {
        self.insert_new(parent_id, name, NodeEntry::File { content: content.to_string() })
    }

    pub fn rename(&mut self, id: &str, new_name: &str) -> Result<Node, FsError> {
        let node = find_mut(&mut self.root, id).ok_or_else(|| not_found(id))?;
        node.name = new_name.trim().to_string();
        let renamed = node.clone();
        self.commit(MutationKind::Renamed, id);
        Ok(renamed)
    }

    /// Replace a file's content verbatim.
    pub fn edit_content(&mut self, id: &str, new_content: &str) -> Result<Node, FsError> {
        let node = find_mut(&mut self.root, id).ok_or_else(|| not_found(id))?;
        match &mut node.entry {
            NodeEntry::File { content } => *content = new_content.to_string(),
            NodeEntry::Directory { .. } => {
                return Err(FsError::NotAFile { id: id.to_string() });
            }
        }
        let edited = node.clone();
        self.commit(MutationKind::Edited, id);
        Ok(edited)
    }

    /// Remove `id` and its whole subtree, returning the removed subtree.
    pub fn delete(&mut self, id: &str) -> Result<Node, FsError> {
        if id == self.root.id {
            return Err(FsError::RootDeletionForbidden);
        }
        if !self.contains(id) {
            return Err(not_found(id));
        }
        let parent_id = self
            .parent_of(id)
            .map(|p| p.id.clone())
            .ok_or_else(|| FsError::ParentNotFound { id: id.to_string() })?;

        let (_, removed) = self.detach(&parent_id, id)?;
        self.commit(MutationKind::Deleted, id);
        Ok(removed)
    }

    /// Move `id` under `new_parent_id`, appending it last.
    pub fn move_node(&mut self, id: &str, new_parent_id: &str) -> Result<MoveOutcome, FsError> {
        if id == self.root.id {
            return Err(FsError::RootMoveForbidden);
        }
        let item = self.get(id).ok_or_else(|| not_found(id))?;
        if subtree_contains(item, new_parent_id) {
            return Err(FsError::CycleDetected {
                id: id.to_string(),
                destination: new_parent_id.to_string(),
            });
        }
        self.require_directory(new_parent_id)?;
        let from_parent = self
            .parent_of(id)
            .map(|p| p.id.clone())
            .ok_or_else(|| FsError::ParentNotFound { id: id.to_string() })?;

        // All checks passed; the destination lies outside the detached subtree.
        let (index, item) = self.detach(&from_parent, id)?;
        let attached = match find_mut(&mut self.root, new_parent_id).and_then(children_mut) {
            Some(children) => {
                children.push(item.clone());
                true
            }
            None => false,
        };
        if !attached {
            if let Some(children) = find_mut(&mut self.root, &from_parent).and_then(children_mut) {
                children.insert(index, item);
            }
            return Err(not_found(new_parent_id));
        }

        self.commit(MutationKind::Moved, id);
        Ok(MoveOutcome {
            item,
            from_parent,
            to_parent: new_parent_id.to_string(),
        })
    }

    /// Deep-copy `id` under `new_parent_id`. The copy and all of its
    /// descendants receive fresh ids.
    pub fn copy_node(&mut self, id: &str, new_parent_id: &str) -> Result<Node, FsError> {
        let item = self.get(id).ok_or_else(|| not_found(id))?;
        if subtree_contains(item, new_parent_id) {
            return Err(FsError::CycleDetected {
                id: id.to_string(),
                destination: new_parent_id.to_string(),
            });
        }
        let mut copy = item.clone();
        self.require_directory(new_parent_id)?;
        self.reassign_ids(&mut copy);

        let children = find_mut(&mut self.root, new_parent_id)
            .and_then(children_mut)
            .ok_or_else(|| not_found(new_parent_id))?;
        children.push(copy.clone());

        self.commit(MutationKind::Copied, &copy.id);
        Ok(copy)
    }

    /// Case-insensitive substring search over names, and over content for
    /// files. Results are in depth-first order, each node once.
    pub fn search(&self, query: &str) -> Vec<&Node> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut results = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            let name_hit = node.name.to_lowercase().contains(&needle);
            let content_hit = node
                .content()
                .map_or(false, |c| c.to_lowercase().contains(&needle));
            if name_hit || content_hit {
                results.push(node);
            }
            stack.extend(node.children().iter().rev());
        }
        results
    }

    pub fn statistics(&self) -> Statistics {
        let mut folders: usize = 0;
        let mut files: usize = 0;
        let mut size: usize = 0;

        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match &node.entry {
                NodeEntry::Directory { children } => {
                    folders += 1;
                    stack.extend(children);
                }
                NodeEntry::File { content } => {
                    files += 1;
                    size += content.chars().count();
                }
            }
        }

        Statistics {
            // the root is not counted
            folders: folders.saturating_sub(1),
            files,
            size,
            last_updated: Utc::now(),
        }
    }

    /// Restore the default tree.
    pub fn reset(&mut self) -> &Node {
        self.root = self.initial.clone();
        let root_id = self.root.id.clone();
        self.commit(MutationKind::Reset, &root_id);
        &self.root
    }

    fn insert_new(&mut self, parent_id: &str, name: &str, entry: NodeEntry) -> Result<Node, FsError> {
        self.require_directory(parent_id)?;

        let prefix = match entry {
            NodeEntry::Directory { .. } => NodeKind::Directory.id_prefix(),
            NodeEntry::File { .. } => NodeKind::File.id_prefix(),
        };
        let node = Node {
            id: self.fresh_id(prefix),
            name: name.trim().to_string(),
            entry,
        };

        let children = find_mut(&mut self.root, parent_id)
            .and_then(children_mut)
            .ok_or_else(|| not_found(parent_id))?;
        children.push(node.clone());

        self.commit(MutationKind::Created, &node.id);
        Ok(node)
    }

    fn require_directory(&self, id: &str) -> Result<(), FsError> {
        match self.get(id) {
            None => Err(not_found(id)),
            Some(node) if !node.is_directory() => Err(FsError::NotADirectory { id: id.to_string() }),
            Some(_) => Ok(()),
        }
    }

    fn detach(&mut self, parent_id: &str, id: &str) -> Result<(usize, Node), FsError> {
        let children = find_mut(&mut self.root, parent_id)
            .and_then(children_mut)
            .ok_or_else(|| FsError::ParentNotFound { id: id.to_string() })?;
        let index = children
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| not_found(id))?;
        Ok((index, children.remove(index)))
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        loop {
            let id = self.ids.next(prefix);
            if !self.contains(&id) {
                return id;
            }
        }
    }

    fn reassign_ids(&mut self, copy: &mut Node) {
        copy.id = self.fresh_id(&format!("{}_copy", copy.kind().id_prefix()));

        let mut stack: Vec<&mut Node> = match &mut copy.entry {
            NodeEntry::Directory { children } => children.iter_mut().collect(),
            NodeEntry::File { .. } => Vec::new(),
        };
        while let Some(node) = stack.pop() {
            node.id = self.fresh_id(node.kind().id_prefix());
            if let NodeEntry::Directory { children } = &mut node.entry {
                stack.extend(children.iter_mut());
            }
        }
    }

    fn commit(&mut self, kind: MutationKind, id: &str) {
        debug!(?kind, id, "tree mutated");
        self.events.push(TreeEvent { kind, id: id.to_string() });
        self.persist();
    }

    fn persist(&mut self) {
        let Some(persistence) = self.persistence.as_mut() else {
            return;
        };
        let result = serde_json::to_string(&self.root)
            .map_err(|e| FsError::Persistence { message: e.to_string() })
            .and_then(|blob| persistence.store.save(&persistence.key, &blob));

        match result {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                // The in-memory tree stays authoritative.
                warn!(error = %e, "snapshot not saved");
                self.last_persist_error = Some(e);
            }
        }
    }
}

// ============================================================================
// Tree walks (explicit stacks, no recursion)
// ============================================================================

fn not_found(id: &str) -> FsError {
    FsError::NotFound { id: id.to_string() }
}

fn children_mut(node: &mut Node) -> Option<&mut Vec<Node>> {
    match &mut node.entry {
        NodeEntry::Directory { children } => Some(children),
        NodeEntry::File { .. } => None,
    }
}

fn find<'a>(root: &'a Node, id: &str) -> Option<&'a Node> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.id == id {
            return Some(node);
        }
        stack.extend(node.children().iter().rev());
    }
    None
}

fn find_mut<'a>(root: &'a mut Node, id: &str) -> Option<&'a mut Node> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.id == id {
            return Some(node);
        }
        if let NodeEntry::Directory { children } = &mut node.entry {
            stack.extend(children.iter_mut().rev());
        }
    }
    None
}

fn find_parent<'a>(root: &'a Node, id: &str) -> Option<&'a Node> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.children().iter().any(|c| c.id == id) {
            return Some(node);
        }
        stack.extend(node.children().iter().rev());
    }
    None
}

/// True if `id` is `node` itself or anywhere below it. Visits only the
/// subtree of `node`.
fn subtree_contains(node: &Node, id: &str) -> bool {
    find(node, id).is_some()
}

fn parse_snapshot(blob: &str) -> Result<Node, FsError> {
    let root: Node = serde_json::from_str(blob).map_err(|e| FsError::InvalidSnapshot {
        message: e.to_string(),
    })?;
    if !root.is_directory() {
        return Err(FsError::InvalidSnapshot {
            message: "root is not a directory".to_string(),
        });
    }

    let mut seen = HashSet::new();
    let mut stack = vec![&root];
    while let Some(node) = stack.pop() {
        if !seen.insert(node.id.as_str()) {
            return Err(FsError::InvalidSnapshot {
                message: format!("duplicate id '{}'", node.id),
            });
        }
        stack.extend(node.children());
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::defaults::explorer_tree;
    use crate::fs::snapshot::{MemorySnapshotStore, SNAPSHOT_KEY};
    use std::sync::{Arc, Mutex};

    fn store() -> TreeStore {
        TreeStore::new(explorer_tree())
    }

    fn all_ids(node: &Node) -> HashSet<String> {
        let mut ids = HashSet::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            ids.insert(n.id.clone());
            stack.extend(n.children());
        }
        ids
    }

    /// Records every saved blob
    struct RecordingStore(Arc<Mutex<Vec<String>>>);

    impl SnapshotStore for RecordingStore {
        fn load(&self, _key: &str) -> Result<Option<String>, FsError> {
            Ok(None)
        }
        fn save(&mut self, _key: &str, blob: &str) -> Result<(), FsError> {
            self.0.lock().unwrap().push(blob.to_string());
            Ok(())
        }
    }

    struct FailingStore;

    impl SnapshotStore for FailingStore {
        fn load(&self, _key: &str) -> Result<Option<String>, FsError> {
            Err(FsError::Persistence { message: "offline".to_string() })
        }
        fn save(&mut self, _key: &str, _blob: &str) -> Result<(), FsError> {
            Err(FsError::Persistence { message: "disk full".to_string() })
        }
    }

    #[test]
    fn test_get_and_parent_of() {
        let store = store();
        assert_eq!(store.get("doc1").map(|n| n.name.as_str()), Some("Important document.txt"));
        assert_eq!(store.parent_of("doc1").map(|n| n.id.as_str()), Some("documents"));
        assert_eq!(store.parent_of("documents").map(|n| n.id.as_str()), Some("root"));
        assert!(store.parent_of("root").is_none());
        assert!(store.get("missing").is_none());
        assert!(store.parent_of("missing").is_none());
    }

    #[test]
    fn test_create_directory_and_file() {
        let mut store = store();
        let dir = store.create_directory("root", "  Projects ").unwrap();
        assert_eq!(dir.name, "Projects");
        assert!(dir.id.starts_with("folder_"));
        let file = store.create_file(&dir.id, "plan.txt", "step 1").unwrap();
        assert!(file.id.starts_with("file_"));

        let parent = store.get(&dir.id).unwrap();
        assert_eq!(parent.children().len(), 1);
        assert_eq!(parent.children()[0].content(), Some("step 1"));
        // appended last
        assert_eq!(store.file_system().children().last().unwrap().id, dir.id);
    }

    #[test]
    fn test_create_permits_blank_name() {
        let mut store = store();
        let dir = store.create_directory("root", "   ").unwrap();
        assert_eq!(dir.name, "");
    }

    #[test]
    fn test_create_under_missing_or_file_parent() {
        let mut store = store();
        assert_eq!(
            store.create_directory("nope", "x").unwrap_err(),
            FsError::NotFound { id: "nope".to_string() }
        );
        assert_eq!(
            store.create_file("readme", "x", "").unwrap_err(),
            FsError::NotADirectory { id: "readme".to_string() }
        );
    }

    #[test]
    fn test_rapid_creates_get_distinct_ids() {
        let mut store = store();
        let ids: HashSet<String> = (0..50)
            .map(|i| store.create_file("root", &format!("f{}", i), "").unwrap().id)
            .collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_rename() {
        let mut store = store();
        let renamed = store.rename("doc2", " Todo.txt\n").unwrap();
        assert_eq!(renamed.name, "Todo.txt");
        assert_eq!(store.get("doc2").unwrap().name, "Todo.txt");
        assert!(matches!(store.rename("nope", "x"), Err(FsError::NotFound { .. })));
        // not guarded
        assert_eq!(store.rename("root", "Computer").unwrap().name, "Computer");
    }

    #[test]
    fn test_edit_content() {
        let mut store = store();
        let edited = store.edit_content("readme", "new text").unwrap();
        assert_eq!(edited.content(), Some("new text"));
        assert_eq!(
            store.edit_content("documents", "x").unwrap_err(),
            FsError::NotAFile { id: "documents".to_string() }
        );
        assert!(matches!(store.edit_content("nope", "x"), Err(FsError::NotFound { .. })));
    }

    #[test]
    fn test_delete_removes_subtree() {
        let mut store = store();
        let before = store.node_count();
        let removed = store.delete("documents").unwrap();
        assert_eq!(removed.id, "documents");
        assert_eq!(removed.children().len(), 2);
        for id in ["documents", "doc1", "doc2"] {
            assert!(store.get(id).is_none(), "{} still reachable", id);
        }
        assert_eq!(store.node_count(), before - 3);
    }

    #[test]
    fn test_delete_root_and_missing() {
        let mut store = store();
        assert_eq!(store.delete("root").unwrap_err(), FsError::RootDeletionForbidden);
        assert_eq!(
            store.delete("nope").unwrap_err(),
            FsError::NotFound { id: "nope".to_string() }
        );
    }

    #[test]
    fn test_move_preserves_structure() {
        let mut store = store();
        let before = store.node_count();
        let subtree = store.get("documents").unwrap().clone();

        let outcome = store.move_node("documents", "downloads").unwrap();
        assert_eq!(outcome.from_parent, "root");
        assert_eq!(outcome.to_parent, "downloads");
        assert_eq!(outcome.item, subtree);

        assert_eq!(store.node_count(), before);
        assert_eq!(store.parent_of("documents").unwrap().id, "downloads");
        assert_eq!(store.get("documents").unwrap(), &subtree);
        let downloads = store.get("downloads").unwrap();
        assert_eq!(downloads.children().last().unwrap().id, "documents");
    }

    #[test]
    fn test_move_within_same_parent_appends_last() {
        let mut store = store();
        store.move_node("documents", "root").unwrap();
        let order: Vec<&str> = store.file_system().children().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec!["pictures", "downloads", "readme", "documents"]);
    }

    #[test]
    fn test_move_into_descendant_is_cycle() {
        let mut store = store();
        let inner = store.create_directory("documents", "inner").unwrap();
        let snapshot = store.file_system().clone();

        let err = store.move_node("documents", &inner.id).unwrap_err();
        assert!(matches!(err, FsError::CycleDetected { .. }));
        assert_eq!(store.file_system(), &snapshot);

        let err = store.move_node("documents", "documents").unwrap_err();
        assert!(matches!(err, FsError::CycleDetected { .. }));
        assert_eq!(store.file_system(), &snapshot);
    }

    #[test]
    fn test_move_errors() {
        let mut store = store();
        assert_eq!(store.move_node("root", "documents").unwrap_err(), FsError::RootMoveForbidden);
        assert!(matches!(store.move_node("nope", "documents"), Err(FsError::NotFound { .. })));
        assert!(matches!(store.move_node("doc1", "nope"), Err(FsError::NotFound { .. })));
        assert_eq!(
            store.move_node("doc1", "readme").unwrap_err(),
            FsError::NotADirectory { id: "readme".to_string() }
        );
    }

    #[test]
    fn test_copy_assigns_fresh_ids() {
        let mut store = store();
        let original = store.get("documents").unwrap().clone();
        let existing = all_ids(store.file_system());

        let copy = store.copy_node("documents", "pictures").unwrap();
        assert!(copy.id.starts_with("folder_copy_"));
        assert_eq!(copy.name, original.name);
        assert_eq!(copy.children().len(), original.children().len());

        let copy_ids = all_ids(&copy);
        assert_eq!(copy_ids.len(), original.subtree_len());
        assert!(copy_ids.is_disjoint(&existing));

        assert_eq!(store.get("documents").unwrap(), &original);
        assert_eq!(store.parent_of(&copy.id).unwrap().id, "pictures");
        assert_eq!(store.node_count(), existing.len() + copy_ids.len());
    }

    #[test]
    fn test_copy_file_content() {
        let mut store = store();
        let copy = store.copy_node("readme", "documents").unwrap();
        assert!(copy.id.starts_with("file_copy_"));
        assert_eq!(copy.content(), store.get("readme").unwrap().content());
    }

    #[test]
    fn test_copy_errors() {
        let mut store = store();
        assert!(matches!(store.copy_node("nope", "root"), Err(FsError::NotFound { .. })));
        assert!(matches!(store.copy_node("doc1", "readme"), Err(FsError::NotADirectory { .. })));
        assert!(matches!(
            store.copy_node("documents", "documents"),
            Err(FsError::CycleDetected { .. })
        ));
    }

    #[test]
    fn test_search() {
        let mut store = store();
        store.create_file("pictures", "notes-copy.txt", "mentions NOTES twice: notes").unwrap();

        let ids: Vec<&str> = store.search("NoTeS").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], "doc2");

        // content-only match
        let hits = store.search("virtual desktop");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "download1");

        assert!(store.search("").is_empty());
        assert!(store.search("   ").is_empty());
        assert!(store.search("zzz-not-there").is_empty());
    }

    #[test]
    fn test_search_results_all_match() {
        let store = store();
        for node in store.search("o") {
            let hit = node.name.to_lowercase().contains('o')
                || node.content().map_or(false, |c| c.to_lowercase().contains('o'));
            assert!(hit);
        }
    }

    #[test]
    fn test_statistics_end_to_end() {
        let mut store = store();
        let before = store.statistics();
        assert_eq!(before.folders, 3);
        assert_eq!(before.files, 4);

        let x = store.create_directory("root", "X").unwrap();
        store.create_file(&x.id, "f.txt", "hi").unwrap();
        let after = store.statistics();
        assert_eq!(after.folders, before.folders + 1);
        assert_eq!(after.files, before.files + 1);
        assert_eq!(after.size, before.size + 2);
    }

    #[test]
    fn test_statistics_root_only_tree() {
        let mut store = TreeStore::new(Node::directory("root", "My Files"));
        assert_eq!(store.node_count(), 1);
        let stats = store.statistics();
        assert_eq!((stats.folders, stats.files, stats.size), (0, 0, 0));

        store.create_file("root", "u.txt", "héllo😀").unwrap();
        let stats = store.statistics();
        assert_eq!((stats.folders, stats.files, stats.size), (0, 1, 6));
        assert_eq!(store.node_count(), 2);
    }

    #[test]
    fn test_mutations_persist_snapshots() {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let mut store = TreeStore::open(
            explorer_tree(),
            Box::new(RecordingStore(saved.clone())),
            SNAPSHOT_KEY,
        );
        store.create_directory("root", "A").unwrap();
        store.rename("readme", "READ.txt").unwrap();
        let blobs = saved.lock().unwrap();
        assert_eq!(blobs.len(), 2);
        let last: Node = serde_json::from_str(&blobs[1]).unwrap();
        assert_eq!(&last, store.file_system());
    }

    #[test]
    fn test_rejected_operations_do_not_persist() {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let mut store = TreeStore::open(
            explorer_tree(),
            Box::new(RecordingStore(saved.clone())),
            SNAPSHOT_KEY,
        );
        let _ = store.delete("root");
        let _ = store.move_node("nope", "root");
        assert!(saved.lock().unwrap().is_empty());
    }

    #[test]
    fn test_persist_failure_keeps_mutation() {
        let mut store = TreeStore::open(explorer_tree(), Box::new(FailingStore), SNAPSHOT_KEY);
        // unreadable snapshot falls back to the default tree
        assert_eq!(store.file_system(), &explorer_tree());

        let dir = store.create_directory("root", "kept").unwrap();
        assert!(store.get(&dir.id).is_some());
        assert!(matches!(store.last_persist_error(), Some(FsError::Persistence { .. })));
    }

    #[test]
    fn test_open_loads_saved_tree() {
        let mut first = TreeStore::open(explorer_tree(), Box::new(MemorySnapshotStore::new()), SNAPSHOT_KEY);
        first.create_file("root", "saved.txt", "x").unwrap();
        let blob = serde_json::to_string(first.file_system()).unwrap();

        let second = TreeStore::open(
            explorer_tree(),
            Box::new(MemorySnapshotStore::with_blob(SNAPSHOT_KEY, blob)),
            SNAPSHOT_KEY,
        );
        assert_eq!(second.file_system(), first.file_system());
    }

    #[test]
    fn test_open_falls_back_on_corrupt_snapshot() {
        for blob in [
            "{not json",
            r#"{"id":"root","name":"r","type":"file","content":""}"#,
            r#"{"id":"root","name":"r","type":"folder","children":[
                {"id":"a","name":"a","type":"file"},{"id":"a","name":"b","type":"file"}]}"#,
        ] {
            let store = TreeStore::open(
                explorer_tree(),
                Box::new(MemorySnapshotStore::with_blob(SNAPSHOT_KEY, blob)),
                SNAPSHOT_KEY,
            );
            assert_eq!(store.file_system(), &explorer_tree());
        }
    }

    #[test]
    fn test_drain_events() {
        let mut store = store();
        let dir = store.create_directory("root", "A").unwrap();
        store.delete(&dir.id).unwrap();
        let _ = store.delete("root");

        let events = store.drain_events();
        assert_eq!(
            events,
            vec![
                TreeEvent { kind: MutationKind::Created, id: dir.id.clone() },
                TreeEvent { kind: MutationKind::Deleted, id: dir.id.clone() },
            ]
        );
        assert!(store.drain_events().is_empty());
    }

    #[test]
    fn test_reset_restores_default() {
        let mut store = store();
        store.delete("documents").unwrap();
        store.create_directory("root", "tmp").unwrap();
        assert_eq!(store.reset(), &explorer_tree());
    }
}
