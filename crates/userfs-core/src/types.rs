//! Core type definitions for UserFS

use serde::Serialize;

/// Opaque node identifier into the namespace arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u64);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Access being requested against a node's mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
    Execute,
}

impl Access {
    /// Bit value within a single rwx triplet.
    pub fn bit(self) -> u32 {
        match self {
            Access::Read => 4,
            Access::Write => 2,
            Access::Execute => 1,
        }
    }
}

/// Node kind as seen by callers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

/// Node attributes
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Attributes {
    pub name: String,
    pub kind: EntryKind,
    pub owner: String,
    pub mode: u32,
    /// Content length for files, entry count for directories
    pub len: u64,
}

impl Attributes {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// Directory entry information
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
    pub owner: String,
    pub mode: u32,
    pub len: u64,
}

impl DirEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}
