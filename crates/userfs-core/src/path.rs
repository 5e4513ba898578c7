//! Path normalization

use crate::config::DotDotPolicy;
use crate::error::{FsError, FsResult};

/// Split a path into its normalized components.
///
/// Leading, trailing and repeated separators are dropped, as are `.`
/// components. Paths are always interpreted relative to root, so `a/b` and
/// `/a/b` are the same path. An empty result denotes root itself.
pub fn components(path: &str, policy: DotDotPolicy) -> FsResult<Vec<String>> {
    let mut parts: Vec<String> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => match policy {
                DotDotPolicy::Reject => {
                    return Err(FsError::InvalidPath(format!("'..' not allowed in {path}")));
                }
                DotDotPolicy::Lexical => {
                    if parts.pop().is_none() {
                        return Err(FsError::InvalidPath(format!("{path} escapes root")));
                    }
                }
            },
            name => parts.push(name.to_string()),
        }
    }
    Ok(parts)
}

/// Render components back as an absolute path.
pub fn display_path<S: AsRef<str>>(parts: &[S]) -> String {
    if parts.is_empty() {
        return "/".to_string();
    }
    let mut out = String::new();
    for part in parts {
        out.push('/');
        out.push_str(part.as_ref());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexical(path: &str) -> Vec<String> {
        components(path, DotDotPolicy::Lexical).unwrap()
    }

    #[test]
    fn test_root_forms() {
        assert!(lexical("").is_empty());
        assert!(lexical("/").is_empty());
        assert!(lexical("//./").is_empty());
    }

    #[test]
    fn test_collapses_separators_and_dots() {
        assert_eq!(lexical("/docs//./readme.txt/"), vec!["docs", "readme.txt"]);
        assert_eq!(lexical("docs/readme.txt"), vec!["docs", "readme.txt"]);
    }

    #[test]
    fn test_dot_dot_lexical() {
        assert_eq!(lexical("/a/b/../c"), vec!["a", "c"]);
        assert!(lexical("/a/..").is_empty());
        assert!(matches!(
            components("/../a", DotDotPolicy::Lexical),
            Err(FsError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_dot_dot_rejected() {
        assert!(matches!(
            components("/a/../b", DotDotPolicy::Reject),
            Err(FsError::InvalidPath(_))
        ));
        assert_eq!(components("/a/./b", DotDotPolicy::Reject).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_display_path() {
        assert_eq!(display_path::<&str>(&[]), "/");
        assert_eq!(display_path(&["docs", "readme.txt"]), "/docs/readme.txt");
    }
}
