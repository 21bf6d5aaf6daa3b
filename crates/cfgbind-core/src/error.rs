use std::path::PathBuf;
use thiserror::Error;

/// Errors shared by every cfgbind crate.
///
/// Format crates define their own error enums and convert into this one,
/// so callers of the binder only ever match on `ConfigError`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the configuration file failed
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid for its format
    #[error("Failed to parse {format} file{}: {source}", display_path(.path.as_ref()))]
    Parse {
        format: String,
        path: Option<PathBuf>,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The document does not fit the settings type
    #[error("Failed to map {format} document onto settings: {message}")]
    Deserialize { format: String, message: String },

    /// The settings type cannot be represented in the format
    #[error("Failed to write settings as {format}: {message}")]
    Serialize { format: String, message: String },

    /// A schema declares something the binder cannot honour
    #[error("Invalid schema: {message}")]
    InvalidSchema { message: String },

    /// A dotted key path is malformed
    #[error("Invalid config path '{path}'")]
    InvalidPath { path: String },
}

/// Result type alias for cfgbind operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

fn display_path(path: Option<&PathBuf>) -> String {
    path.map(|p| format!(" '{}'", p.display()))
        .unwrap_or_default()
}

impl ConfigError {
    /// Create an I/O error bound to the file it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a schema validation error.
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            message: message.into(),
        }
    }

    /// Create a path error.
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Attach the file path to a parse error that was raised without one.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn with_path(self, file: impl Into<PathBuf>) -> Self {
        match self {
            Self::Parse {
                format,
                path: None,
                source,
            } => Self::Parse {
                format,
                path: Some(file.into()),
                source,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error() -> ConfigError {
        ConfigError::Parse {
            format: "TOML".into(),
            path: None,
            source: Box::new(std::io::Error::other("unexpected '{'")),
        }
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::invalid_schema("duplicate key 'name'");
        insta::assert_snapshot!(err.to_string(), @"Invalid schema: duplicate key 'name'");

        let err = ConfigError::invalid_path("a..b");
        insta::assert_snapshot!(err.to_string(), @"Invalid config path 'a..b'");

        insta::assert_snapshot!(parse_error().to_string(), @"Failed to parse TOML file: unexpected '{'");
    }

    #[test]
    fn test_with_path_attaches_file() {
        let err = parse_error().with_path("config/example.toml");
        insta::assert_snapshot!(
            err.to_string(),
            @"Failed to parse TOML file 'config/example.toml': unexpected '{'"
        );
    }

    #[test]
    fn test_with_path_keeps_existing_path() {
        let err = parse_error().with_path("first.toml").with_path("second.toml");
        assert!(err.to_string().contains("first.toml"));
        assert!(!err.to_string().contains("second.toml"));
    }

    #[test]
    fn test_with_path_ignores_other_variants() {
        let err = ConfigError::invalid_schema("x").with_path("a.toml");
        assert!(matches!(err, ConfigError::InvalidSchema { .. }));
    }

    #[test]
    fn test_io_error_construction() {
        let err = ConfigError::io(
            "missing.toml",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().starts_with("I/O error on 'missing.toml'"));
    }
}
