//! Node arena and path resolution for UserFS Core

use std::collections::HashMap;

use crate::error::{FsError, FsResult};
use crate::path::display_path;
use crate::{Attributes, DirEntry, EntryKind, NodeId};

/// Namespace node types
#[derive(Clone, Debug)]
pub(crate) enum NodeKind {
    File { content: Vec<u8> },
    Directory { children: HashMap<String, NodeId> },
}

/// Namespace node
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub name: String,
    pub owner: String,
    pub mode: u32,
    pub kind: NodeKind,
}

impl Node {
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    pub fn entry_kind(&self) -> EntryKind {
        match self.kind {
            NodeKind::File { .. } => EntryKind::File,
            NodeKind::Directory { .. } => EntryKind::Dir,
        }
    }

    fn len(&self) -> u64 {
        match &self.kind {
            NodeKind::File { content } => content.len() as u64,
            NodeKind::Directory { children } => children.len() as u64,
        }
    }

    pub fn attributes(&self) -> Attributes {
        Attributes {
            name: self.name.clone(),
            kind: self.entry_kind(),
            owner: self.owner.clone(),
            mode: self.mode,
            len: self.len(),
        }
    }

    pub fn dir_entry(&self) -> DirEntry {
        DirEntry {
            name: self.name.clone(),
            kind: self.entry_kind(),
            owner: self.owner.clone(),
            mode: self.mode,
            len: self.len(),
        }
    }
}

/// Arena of nodes rooted at [`NodeId::ROOT`].
///
/// Directories refer to their children by id; each non-root id appears in
/// exactly one directory's children map.
#[derive(Debug)]
pub(crate) struct Tree {
    nodes: HashMap<NodeId, Node>,
    next_node_id: u64,
}

impl Tree {
    pub fn new(root_owner: &str, root_mode: u32) -> Self {
        let root = Node {
            name: "/".to_string(),
            owner: root_owner.to_string(),
            mode: root_mode & 0o777,
            kind: NodeKind::Directory {
                children: HashMap::new(),
            },
        };
        let mut nodes = HashMap::new();
        nodes.insert(NodeId::ROOT, root);
        Self {
            nodes,
            next_node_id: 1,
        }
    }

    fn allocate_node_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    pub fn node(&self, id: NodeId) -> FsResult<&Node> {
        self.nodes
            .get(&id)
            .ok_or_else(|| FsError::NotFound(format!("node {id:?}")))
    }

    pub fn node_mut(&mut self, id: NodeId) -> FsResult<&mut Node> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| FsError::NotFound(format!("node {id:?}")))
    }

    fn children_mut(&mut self, dir: NodeId) -> FsResult<&mut HashMap<String, NodeId>> {
        let node = self.node_mut(dir)?;
        match &mut node.kind {
            NodeKind::Directory { children } => Ok(children),
            NodeKind::File { .. } => Err(FsError::NotADirectory(node.name.clone())),
        }
    }

    /// Look up `name` inside directory `dir`.
    pub fn child(&self, dir: NodeId, name: &str) -> FsResult<Option<NodeId>> {
        let node = self.node(dir)?;
        match &node.kind {
            NodeKind::Directory { children } => Ok(children.get(name).copied()),
            NodeKind::File { .. } => Err(FsError::NotADirectory(node.name.clone())),
        }
    }

    /// Children of `dir`, sorted by name.
    pub fn sorted_children(&self, dir: NodeId) -> FsResult<Vec<&Node>> {
        let node = self.node(dir)?;
        let NodeKind::Directory { children } = &node.kind else {
            return Err(FsError::NotADirectory(node.name.clone()));
        };
        let mut entries = children
            .values()
            .map(|id| self.node(*id))
            .collect::<FsResult<Vec<_>>>()?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn walk(&self, parts: &[String], full: &[String]) -> FsResult<NodeId> {
        let mut current = NodeId::ROOT;
        for part in parts {
            let next = match &self.node(current)?.kind {
                NodeKind::Directory { children } => children.get(part).copied(),
                NodeKind::File { .. } => None,
            };
            current = next.ok_or_else(|| FsError::NotFound(display_path(full)))?;
        }
        Ok(current)
    }

    /// Locate the node named by `parts`. Empty `parts` is root.
    pub fn resolve_node(&self, parts: &[String]) -> FsResult<NodeId> {
        self.walk(parts, parts)
    }

    /// Locate the directory that holds (or would hold) the last component.
    pub fn resolve_parent(&self, parts: &[String]) -> FsResult<NodeId> {
        let Some((_, ancestors)) = parts.split_last() else {
            return Ok(NodeId::ROOT);
        };
        let parent = self.walk(ancestors, parts)?;
        if self.node(parent)?.is_dir() {
            Ok(parent)
        } else {
            Err(FsError::NotFound(display_path(parts)))
        }
    }

    /// Create a node under `parent`. The caller has checked `name` is free.
    pub fn create_child(
        &mut self,
        parent: NodeId,
        name: &str,
        owner: &str,
        mode: u32,
        kind: NodeKind,
    ) -> FsResult<NodeId> {
        if self.child(parent, name)?.is_some() {
            return Err(FsError::AlreadyExists(name.to_string()));
        }
        let id = self.allocate_node_id();
        self.nodes.insert(
            id,
            Node {
                name: name.to_string(),
                owner: owner.to_string(),
                mode: mode & 0o777,
                kind,
            },
        );
        self.children_mut(parent)?.insert(name.to_string(), id);
        Ok(id)
    }

    /// Relink `name` from `src_parent` to `dest_name` under `dest_parent`.
    ///
    /// Both parents must be directories, `name` must exist, and `dest_name`
    /// must be free; the tree is unchanged when any of that fails.
    pub fn relink(
        &mut self,
        src_parent: NodeId,
        name: &str,
        dest_parent: NodeId,
        dest_name: &str,
    ) -> FsResult<NodeId> {
        let id = self
            .child(src_parent, name)?
            .ok_or_else(|| FsError::NotFound(name.to_string()))?;
        if self.child(dest_parent, dest_name)?.is_some() {
            return Err(FsError::AlreadyExists(dest_name.to_string()));
        }

        self.children_mut(src_parent)?.remove(name);
        self.children_mut(dest_parent)?.insert(dest_name.to_string(), id);
        self.node_mut(id)?.name = dest_name.to_string();
        Ok(id)
    }

    /// Number of nodes in the arena, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn dir() -> NodeKind {
        NodeKind::Directory {
            children: HashMap::new(),
        }
    }

    fn file(content: &[u8]) -> NodeKind {
        NodeKind::File {
            content: content.to_vec(),
        }
    }

    fn sample() -> Tree {
        let mut tree = Tree::new("root", 0o777);
        let docs = tree.create_child(NodeId::ROOT, "docs", "alice", 0o755, dir()).unwrap();
        tree.create_child(docs, "readme.txt", "alice", 0o644, file(b"hi")).unwrap();
        tree
    }

    #[test]
    fn test_resolve_node() {
        let tree = sample();
        assert_eq!(tree.resolve_node(&[]).unwrap(), NodeId::ROOT);
        let id = tree.resolve_node(&parts(&["docs", "readme.txt"])).unwrap();
        assert_eq!(tree.node(id).unwrap().name, "readme.txt");
    }

    #[test]
    fn test_resolve_through_file_is_not_found() {
        let tree = sample();
        let err = tree.resolve_node(&parts(&["docs", "readme.txt", "x"])).unwrap_err();
        assert!(matches!(err, FsError::NotFound(p) if p == "/docs/readme.txt/x"));
    }

    #[test]
    fn test_resolve_parent() {
        let tree = sample();
        assert_eq!(tree.resolve_parent(&[]).unwrap(), NodeId::ROOT);
        assert_eq!(tree.resolve_parent(&parts(&["new"])).unwrap(), NodeId::ROOT);
        let docs = tree.resolve_node(&parts(&["docs"])).unwrap();
        assert_eq!(tree.resolve_parent(&parts(&["docs", "missing"])).unwrap(), docs);
        assert!(matches!(
            tree.resolve_parent(&parts(&["docs", "readme.txt", "x"])),
            Err(FsError::NotFound(_))
        ));
        assert!(matches!(
            tree.resolve_parent(&parts(&["nope", "x"])),
            Err(FsError::NotFound(_))
        ));
    }

    #[test]
    fn test_relink_keeps_id_and_renames() {
        let mut tree = sample();
        let docs = tree.resolve_node(&parts(&["docs"])).unwrap();
        let before = tree.resolve_node(&parts(&["docs", "readme.txt"])).unwrap();

        let moved = tree.relink(docs, "readme.txt", NodeId::ROOT, "README").unwrap();
        assert_eq!(moved, before);
        assert_eq!(tree.node(moved).unwrap().name, "README");
        assert_eq!(tree.child(docs, "readme.txt").unwrap(), None);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_relink_refuses_occupied_destination() {
        let mut tree = sample();
        let docs = tree.resolve_node(&parts(&["docs"])).unwrap();
        let err = tree.relink(NodeId::ROOT, "docs", docs, "readme.txt").unwrap_err();
        assert!(matches!(err, FsError::AlreadyExists(_)));
        assert!(tree.child(NodeId::ROOT, "docs").unwrap().is_some());
    }

    #[test]
    fn test_sorted_children() {
        let mut tree = sample();
        for name in ["b.txt", "a.txt"] {
            tree.create_child(NodeId::ROOT, name, "alice", 0o644, file(b"")).unwrap();
        }
        let names: Vec<_> = tree
            .sorted_children(NodeId::ROOT)
            .unwrap()
            .into_iter()
            .map(|n| n.name.clone())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "docs"]);
    }
}
