//! Bind typed settings to commented TOML files.
//!
//! Declare the keys of a settings struct with a [`Schema`], derive serde's
//! traits, and let [`ConfigFile`] keep the struct and the file in sync:
//! missing keys are filled with (translated) defaults, every declared key
//! gets its comment, and conditional sections only appear when their switch
//! is on.

pub mod file;
pub mod only_if;

pub use cfgbind_core::{
    Config, ConfigError, ConfigPath, ConfigSection, FieldKind, FieldSpec, Result, Schema,
    Translator,
};
pub use cfgbind_toml::{Correction, TomlDocument, format_comment};
pub use file::ConfigFile;
pub use only_if::{RemovalRule, RemovalRules};

/// Implementation title of this build.
pub const IMPLEMENTATION_TITLE: &str = env!("CARGO_PKG_NAME");

/// Implementation version of this build.
pub const IMPLEMENTATION_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_implementation_metadata() {
        assert_eq!(IMPLEMENTATION_TITLE, "cfgbind");
        assert_eq!(IMPLEMENTATION_VERSION, "1.1.6");
    }
}
