//! Namespace engine for UserFS Core

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::{FsError, FsResult};
use crate::path::{components, display_path};
use crate::permissions::is_permitted;
use crate::tree::{NodeKind, Tree};
use crate::users::UserRegistry;
use crate::{Access, Attributes, DirEntry, FsConfig, NodeId};

/// In-memory multi-user namespace.
///
/// Every operation names the requesting user; that user must have been
/// registered with [`Namespace::create_user`]. Mutating operations take
/// `&mut self`, so sharing an instance across threads needs an outer lock.
#[derive(Debug)]
pub struct Namespace {
    config: FsConfig,
    users: UserRegistry,
    tree: Tree,
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new(FsConfig::default())
    }
}

impl Namespace {
    pub fn new(config: FsConfig) -> Self {
        let tree = Tree::new(&config.root_owner, config.root_mode);
        Self {
            config,
            users: UserRegistry::new(),
            tree,
        }
    }

    pub fn config(&self) -> &FsConfig {
        &self.config
    }

    // User operations
    pub fn create_user(&mut self, username: &str) -> FsResult<()> {
        if self.users.register(username)? {
            info!(user = username, "registered user");
        } else {
            debug!(user = username, "user already registered");
        }
        Ok(())
    }

    pub fn has_user(&self, username: &str) -> bool {
        self.users.contains(username)
    }

    pub fn users(&self) -> Vec<String> {
        self.users.names()
    }

    /// Number of nodes in the namespace, root included.
    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    fn components(&self, path: &str) -> FsResult<Vec<String>> {
        components(path, self.config.dot_dot)
    }

    fn authorize(&self, id: NodeId, username: &str, access: Access, what: &str) -> FsResult<()> {
        let node = self.tree.node(id)?;
        if is_permitted(node.mode, &node.owner, username, access) {
            Ok(())
        } else {
            debug!(user = username, ?access, on = what, "permission denied");
            Err(FsError::denied(what))
        }
    }

    // Directory operations
    pub fn mkdir(&mut self, path: &str, username: &str) -> FsResult<()> {
        self.mkdir_with_mode(path, username, self.config.default_dir_mode)
    }

    /// Create `path` and any missing ancestors, all owned by `username` and
    /// all created with `mode`. Existing directories along the way are left
    /// as they are.
    pub fn mkdir_with_mode(&mut self, path: &str, username: &str, mode: u32) -> FsResult<()> {
        self.users.require(username)?;
        let parts = self.components(path)?;

        let mut current = NodeId::ROOT;
        for (i, part) in parts.iter().enumerate() {
            match self.tree.child(current, part)? {
                Some(id) => {
                    if !self.tree.node(id)?.is_dir() {
                        return Err(FsError::NotADirectory(display_path(&parts[..=i])));
                    }
                    current = id;
                }
                None => {
                    let parent_path = display_path(&parts[..i]);
                    let what = format!("write on {parent_path}");
                    self.authorize(current, username, Access::Write, &what)?;
                    current = self.tree.create_child(
                        current,
                        part,
                        username,
                        mode,
                        NodeKind::Directory {
                            children: HashMap::new(),
                        },
                    )?;
                    debug!(
                        user = username,
                        path = %display_path(&parts[..=i]),
                        mode = %format!("{mode:o}"),
                        "created directory"
                    );
                }
            }
        }
        Ok(())
    }

    pub fn list_dir(&self, path: &str, username: &str) -> FsResult<Vec<String>> {
        Ok(self
            .readdir(path, username)?
            .into_iter()
            .map(|entry| entry.name)
            .collect())
    }

    /// Entries of the directory at `path`, sorted by name.
    pub fn readdir(&self, path: &str, username: &str) -> FsResult<Vec<DirEntry>> {
        self.users.require(username)?;
        let parts = self.components(path)?;
        let id = if parts.is_empty() {
            NodeId::ROOT
        } else {
            self.tree.resolve_node(&parts)?
        };

        let shown = display_path(&parts);
        if !self.tree.node(id)?.is_dir() {
            return Err(FsError::NotADirectory(shown));
        }
        self.authorize(id, username, Access::Read, &format!("read on {shown}"))?;

        Ok(self
            .tree
            .sorted_children(id)?
            .into_iter()
            .map(|node| node.dir_entry())
            .collect())
    }

    // File operations
    pub fn write_file(
        &mut self,
        path: &str,
        username: &str,
        data: impl AsRef<[u8]>,
    ) -> FsResult<()> {
        self.write_file_with_mode(path, username, data, self.config.default_file_mode)
    }

    /// Create or overwrite the file at `path`. `mode` only applies when the
    /// file is created; overwriting keeps the existing owner and mode.
    pub fn write_file_with_mode(
        &mut self,
        path: &str,
        username: &str,
        data: impl AsRef<[u8]>,
        mode: u32,
    ) -> FsResult<()> {
        self.users.require(username)?;
        let parts = self.components(path)?;
        let Some((name, ancestors)) = parts.split_last() else {
            return Err(FsError::invalid_op("cannot write to root"));
        };

        let parent = self.tree.resolve_parent(&parts)?;
        let parent_path = display_path(ancestors);
        self.authorize(parent, username, Access::Write, &format!("write on {parent_path}"))?;

        let data = data.as_ref();
        let shown = display_path(&parts);
        let Some(existing) = self.tree.child(parent, name)? else {
            self.tree.create_child(
                parent,
                name,
                username,
                mode,
                NodeKind::File {
                    content: data.to_vec(),
                },
            )?;
            debug!(user = username, path = %shown, len = data.len(), "created file");
            return Ok(());
        };

        if self.tree.node(existing)?.is_dir() {
            return Err(FsError::IsADirectory(shown));
        }
        self.authorize(existing, username, Access::Write, &format!("write on {shown}"))?;

        match &mut self.tree.node_mut(existing)?.kind {
            NodeKind::File { content } => {
                content.clear();
                content.extend_from_slice(data);
            }
            NodeKind::Directory { .. } => return Err(FsError::IsADirectory(shown)),
        }
        debug!(user = username, path = %shown, len = data.len(), "overwrote file");
        Ok(())
    }

    pub fn read_file(&self, path: &str, username: &str) -> FsResult<Vec<u8>> {
        self.users.require(username)?;
        let parts = self.components(path)?;
        let id = self.tree.resolve_node(&parts)?;
        let shown = display_path(&parts);

        match &self.tree.node(id)?.kind {
            NodeKind::Directory { .. } => Err(FsError::IsADirectory(shown)),
            NodeKind::File { content } => {
                self.authorize(id, username, Access::Read, &format!("read on {shown}"))?;
                Ok(content.clone())
            }
        }
    }

    // Namespace mutation
    /// Move the node at `src_path` to `dest_path`, renaming it to the
    /// destination's last component. Never overwrites; every check runs
    /// before the tree is touched.
    pub fn move_node(&mut self, src_path: &str, dest_path: &str, username: &str) -> FsResult<()> {
        self.users.require(username)?;
        let src = self.components(src_path)?;
        let dest = self.components(dest_path)?;
        let Some((src_name, src_ancestors)) = src.split_last() else {
            return Err(FsError::invalid_op("cannot move root"));
        };
        let Some((dest_name, dest_ancestors)) = dest.split_last() else {
            return Err(FsError::invalid_op("cannot move to root"));
        };

        let src_parent = self.tree.resolve_parent(&src)?;
        if self.tree.child(src_parent, src_name)?.is_none() {
            return Err(FsError::NotFound(display_path(&src)));
        }
        self.authorize(
            src_parent,
            username,
            Access::Write,
            &format!("source parent {}", display_path(src_ancestors)),
        )?;

        let dest_parent = self.tree.resolve_parent(&dest)?;
        self.authorize(
            dest_parent,
            username,
            Access::Write,
            &format!("destination parent {}", display_path(dest_ancestors)),
        )?;

        if self.tree.child(dest_parent, dest_name)?.is_some() {
            return Err(FsError::AlreadyExists(display_path(&dest)));
        }
        if dest.starts_with(&src) {
            return Err(FsError::invalid_op(format!(
                "cannot move {} into itself",
                display_path(&src)
            )));
        }

        self.tree.relink(src_parent, src_name, dest_parent, dest_name)?;
        debug!(user = username, from = %display_path(&src), to = %display_path(&dest), "moved");
        Ok(())
    }

    /// Change the mode of the node at `path`. Only its owner may do so.
    pub fn chmod(&mut self, path: &str, username: &str, mode: u32) -> FsResult<()> {
        self.users.require(username)?;
        let parts = self.components(path)?;
        let id = self.tree.resolve_node(&parts)?;
        let shown = display_path(&parts);

        let node = self.tree.node_mut(id)?;
        if node.owner != username {
            return Err(FsError::denied(format!("only the owner may change mode of {shown}")));
        }
        node.mode = mode & 0o777;
        debug!(user = username, path = %shown, mode = %format!("{:o}", node.mode), "changed mode");
        Ok(())
    }

    pub fn stat(&self, path: &str, username: &str) -> FsResult<Attributes> {
        self.users.require(username)?;
        let parts = self.components(path)?;
        let id = self.tree.resolve_node(&parts)?;
        Ok(self.tree.node(id)?.attributes())
    }
}
