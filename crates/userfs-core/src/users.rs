//! Registry of known user identities

use std::collections::BTreeSet;

use crate::error::{FsError, FsResult};

#[derive(Clone, Debug, Default)]
pub struct UserRegistry {
    users: BTreeSet<String>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `username`. Returns `false` if it was already known.
    pub fn register(&mut self, username: &str) -> FsResult<bool> {
        if username.is_empty() || username.chars().any(char::is_whitespace) {
            return Err(FsError::InvalidName(username.to_string()));
        }
        Ok(self.users.insert(username.to_string()))
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains(username)
    }

    /// Fail with `UnknownUser` unless `username` is registered.
    pub fn require(&self, username: &str) -> FsResult<()> {
        if self.contains(username) {
            Ok(())
        } else {
            Err(FsError::UnknownUser(username.to_string()))
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.users.iter().cloned().collect()
    }
}
