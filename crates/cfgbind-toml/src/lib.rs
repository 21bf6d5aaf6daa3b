//! TOML support for cfgbind.
//!
//! Wraps `toml_edit` so the binder can serialize settings, lay out declared
//! sections as standard tables, attach comments, and fill defaults without
//! losing formatting control:
//! - [`TomlDocument`] is the editable document addressed by dotted paths
//! - [`layout_sections`] turns serde's inline tables into `[table]` headers
//! - [`correct`] applies schema defaults and comments

pub mod comment;
pub mod correct;
pub mod document;
pub mod error;
pub mod layout;

pub use comment::format_comment;
pub use correct::{Correction, correct};
pub use document::TomlDocument;
pub use error::{Result, TomlError};
pub use layout::layout_sections;
