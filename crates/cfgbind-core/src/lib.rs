//! Core abstractions for cfgbind.
//!
//! Format-independent pieces shared by the binder and the format crates:
//! - [`Schema`] and [`FieldSpec`] declare keys, comments, defaults, and conditions
//! - [`ConfigPath`] addresses keys with dotted paths
//! - [`Translator`] localizes comments and defaults
//! - [`ConfigError`] is the error every crate converts into

pub mod config;
pub mod error;
pub mod path;
pub mod schema;
pub mod translator;

pub use config::{Config, ConfigSection};
pub use error::{ConfigError, Result};
pub use path::ConfigPath;
pub use schema::{FieldKind, FieldSpec, Schema};
pub use translator::Translator;
