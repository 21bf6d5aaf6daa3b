//! Errors specific to TOML document handling.

use thiserror::Error;

const FORMAT: &str = "TOML";

#[derive(Error, Debug)]
pub enum TomlError {
    #[error("Failed to parse TOML: {source}")]
    Parse {
        #[source]
        source: toml_edit::TomlError,
    },

    #[error("Failed to deserialize TOML: {source}")]
    Deserialize {
        #[source]
        source: toml_edit::de::Error,
    },

    #[error("Failed to serialize TOML: {source}")]
    Serialize {
        #[source]
        source: toml_edit::ser::Error,
    },
}

pub type Result<T> = std::result::Result<T, TomlError>;

impl From<TomlError> for cfgbind_core::ConfigError {
    fn from(err: TomlError) -> Self {
        match err {
            TomlError::Parse { source } => Self::Parse {
                format: FORMAT.into(),
                path: None,
                source: Box::new(source),
            },
            TomlError::Deserialize { source } => Self::Deserialize {
                format: FORMAT.into(),
                message: source.to_string(),
            },
            TomlError::Serialize { source } => Self::Serialize {
                format: FORMAT.into(),
                message: source.to_string(),
            },
        }
    }
}
