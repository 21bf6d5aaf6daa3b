//! Dotted key paths into a configuration document.

use crate::error::{ConfigError, Result};
use std::fmt;
use std::str::FromStr;

/// A key path such as `server.network.port`.
///
/// Always holds at least one segment, and no segment is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigPath {
    segments: Vec<String>,
}

impl ConfigPath {
    /// Parse a dotted path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] for an empty string or an empty
    /// segment (`a..b`, `.a`, `a.`).
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgbind_core::ConfigPath;
    ///
    /// let path = ConfigPath::parse("server.port").unwrap();
    /// assert_eq!(path.segments(), ["server", "port"]);
    /// assert!(ConfigPath::parse("server..port").is_err());
    /// ```
    pub fn parse(path: &str) -> Result<Self> {
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(ConfigError::invalid_path(path));
        }
        Ok(Self { segments })
    }

    /// A single-segment path. The key is taken verbatim, dots included.
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            segments: vec![key.into()],
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Append one key, returning the child path.
    #[must_use]
    pub fn join(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.to_string());
        Self { segments }
    }

    /// Split into the parent segments and the final key.
    pub fn parent_and_key(&self) -> (&[String], &str) {
        let (key, parent) = self
            .segments
            .split_last()
            .expect("ConfigPath always has at least one segment");
        (parent, key)
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for ConfigPath {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Join an optional parent path with a key.
pub fn child_path(parent: Option<&ConfigPath>, key: &str) -> ConfigPath {
    match parent {
        Some(parent) => parent.join(key),
        None => ConfigPath::key(key),
    }
}
