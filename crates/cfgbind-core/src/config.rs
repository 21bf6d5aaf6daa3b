//! Traits implemented by settings types.

use crate::schema::Schema;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A struct that maps to one table of the configuration file.
///
/// Implemented by the root settings type and by every struct declared as a
/// section or section-list element.
pub trait ConfigSection {
    /// Declared keys of this table, in file order.
    fn schema() -> Schema;
}

/// Root settings type bound to a configuration file.
///
/// The serde implementation decides how values are converted. Mark the
/// struct `#[serde(default)]` so keys missing from the file keep the values
/// from [`Default`].
///
/// # Examples
///
/// ```
/// use cfgbind_core::{Config, ConfigSection, FieldSpec, Schema};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// #[serde(default)]
/// struct Settings {
///     name: Option<String>,
///     aliases: Vec<String>,
/// }
///
/// impl ConfigSection for Settings {
///     fn schema() -> Schema {
///         Schema::new()
///             .field(FieldSpec::value("name").default_value("Steve"))
///             .field(FieldSpec::value("aliases"))
///     }
/// }
///
/// impl Config for Settings {
///     fn between_load_and_save(&mut self) {
///         if self.aliases.is_empty() {
///             self.aliases.push("steve".into());
///         }
///     }
/// }
/// ```
pub trait Config: ConfigSection + Serialize + DeserializeOwned + Default {
    /// Called after the file is loaded and before it is written back.
    ///
    /// Use it to fill lists with default entries or to derive values.
    fn between_load_and_save(&mut self) {}
}
