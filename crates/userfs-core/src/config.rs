//! Configuration types for UserFS Core

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FsResult;

/// How `..` path components are treated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DotDotPolicy {
    /// `..` drops the preceding component; climbing above root is an error
    #[default]
    Lexical,
    /// Any `..` component is an error
    Reject,
}

/// Main namespace configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsConfig {
    /// Owner recorded on the root directory
    pub root_owner: String,
    /// Root directory mode; world-writable so users can create top-level entries
    pub root_mode: u32,
    pub default_dir_mode: u32,
    pub default_file_mode: u32,
    pub dot_dot: DotDotPolicy,
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            root_owner: "root".to_string(),
            root_mode: 0o777,
            default_dir_mode: 0o755,
            default_file_mode: 0o644,
            dot_dot: DotDotPolicy::Lexical,
        }
    }
}

impl FsConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> FsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file.
    pub fn load(path: &Path) -> FsResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "root_mode": 493, "dot_dot": "reject" }"#;
        let config = FsConfig::from_json_str(json).unwrap();
        assert_eq!(config.root_mode, 0o755);
        assert_eq!(config.dot_dot, DotDotPolicy::Reject);
        assert_eq!(config.root_owner, "root");
        assert_eq!(config.default_file_mode, 0o644);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(FsConfig::from_json_str(r#"{ "dot_dot": "follow" }"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("userfs.json");
        std::fs::write(&path, r#"{ "root_owner": "admin" }"#).unwrap();

        let config = FsConfig::load(&path).unwrap();
        assert_eq!(config.root_owner, "admin");
        assert_eq!(config.root_mode, 0o777);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, crate::FsError::Io(_)));
    }
}
