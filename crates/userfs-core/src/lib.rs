//! UserFS Core — in-memory multi-user namespace
//!
//! This crate provides the namespace engine: path resolution, the node tree,
//! the user registry and the owner/other permission model behind the
//! create, write, read, list and move operations.

pub mod config;
pub mod error;
pub mod namespace;
pub mod path;
pub mod permissions;
pub mod types;
pub mod users;

mod tree;

// Re-export key types for convenience
pub use config::{DotDotPolicy, FsConfig};
pub use error::{FsError, FsResult};
pub use namespace::Namespace;
pub use types::*;
pub use users::UserRegistry;
