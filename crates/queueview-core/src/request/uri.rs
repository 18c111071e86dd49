//! Content addresses.

use serde::{Deserialize, Serialize};

/// A content address such as `CHK@<routing>,<crypto>,<extra>/file.txt`.
///
/// The string is kept as reported by the request manager. Only the key
/// type and the document path are interpreted, for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentUri(String);

impl ContentUri {
    /// Wraps a key string.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Returns the full key string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the key type (`CHK`, `SSK`, `USK`, `KSK`), if present.
    #[must_use]
    pub fn key_type(&self) -> Option<&str> {
        self.0.split_once('@').map(|(key_type, _)| key_type)
    }

    /// Abbreviated form for display.
    ///
    /// Keyword keys are human readable and returned unchanged. Other keys
    /// hide their routing and crypto material: `CHK@.../file.txt`.
    #[must_use]
    pub fn short(&self) -> String {
        let Some((key_type, rest)) = self.0.split_once('@') else {
            return self.0.clone();
        };
        if key_type.eq_ignore_ascii_case("KSK") {
            return self.0.clone();
        }
        match rest.split_once('/') {
            Some((_, path)) if !path.is_empty() => format!("{key_type}@.../{path}"),
            _ => format!("{key_type}@..."),
        }
    }
}

impl std::fmt::Display for ContentUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentUri {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hides_key_material() {
        let uri = ContentUri::new("CHK@abcdef,ghijkl,AAMC--8/file.txt");
        assert_eq!(uri.short(), "CHK@.../file.txt");
        assert_eq!(uri.key_type(), Some("CHK"));
    }

    #[test]
    fn test_short_keeps_nested_path() {
        let uri = ContentUri::new("USK@abc,def,AQACAAE/site/4/index.html");
        assert_eq!(uri.short(), "USK@.../site/4/index.html");
    }

    #[test]
    fn test_short_without_path() {
        assert_eq!(ContentUri::new("SSK@abc,def,AQACAAE").short(), "SSK@...");
    }

    #[test]
    fn test_short_keyword_key_unchanged() {
        let uri = ContentUri::new("KSK@gpl.txt");
        assert_eq!(uri.short(), "KSK@gpl.txt");
    }

    #[test]
    fn test_short_malformed_unchanged() {
        assert_eq!(ContentUri::new("not-a-key").short(), "not-a-key");
    }
}
