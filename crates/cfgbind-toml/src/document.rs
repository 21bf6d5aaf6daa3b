//! Editable TOML document addressed by [`ConfigPath`].

use crate::correct::{Correction, correct};
use crate::error::{Result, TomlError};
use crate::layout::layout_sections;
use cfgbind_core::{ConfigPath, Schema, Translator};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use toml_edit::{DocumentMut, Item, TableLike};

/// A TOML document plus the path-based operations the binder needs.
///
/// # Examples
///
/// ```
/// use cfgbind_core::ConfigPath;
/// use cfgbind_toml::TomlDocument;
///
/// let doc = TomlDocument::parse("enabled = true\n[category]\nname = \"a\"\n").unwrap();
/// assert_eq!(doc.get_bool(&ConfigPath::parse("enabled").unwrap()), Some(true));
/// assert!(doc.is_table(&ConfigPath::parse("category").unwrap()));
/// assert!(doc.contains(&ConfigPath::parse("category.name").unwrap()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TomlDocument {
    doc: DocumentMut,
}

impl TomlDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`TomlError::Parse`] if the text is not valid TOML.
    pub fn parse(content: &str) -> Result<Self> {
        let doc = content
            .parse::<DocumentMut>()
            .map_err(|e| TomlError::Parse { source: e })?;
        Ok(Self { doc })
    }

    /// Serialize settings and lay out the sections `schema` declares.
    ///
    /// # Errors
    ///
    /// Returns [`TomlError::Serialize`] if the value has no TOML
    /// representation (for example a root that is not a struct or map).
    pub fn from_settings<T: Serialize + ?Sized>(settings: &T, schema: &Schema) -> Result<Self> {
        let text =
            toml_edit::ser::to_string(settings).map_err(|e| TomlError::Serialize { source: e })?;
        let mut document = Self::parse(&text)?;
        layout_sections(document.doc.as_table_mut(), schema);
        Ok(document)
    }

    /// Deserialize the document into settings.
    ///
    /// # Errors
    ///
    /// Returns [`TomlError::Deserialize`] if the document does not fit `T`.
    pub fn to_settings<T: DeserializeOwned>(&self) -> Result<T> {
        toml_edit::de::from_str(&self.doc.to_string())
            .map_err(|e| TomlError::Deserialize { source: e })
    }

    /// Apply defaults and comments from `schema`.
    pub fn correct(&mut self, schema: &Schema, translator: &Translator) -> Correction {
        correct(self.doc.as_table_mut(), schema, translator)
    }

    pub fn contains(&self, path: &ConfigPath) -> bool {
        self.item(path).is_some()
    }

    /// Boolean at `path`, or `None` if absent or of another type.
    pub fn get_bool(&self, path: &ConfigPath) -> Option<bool> {
        self.item(path).and_then(Item::as_bool)
    }

    /// Whether `path` holds a standard or inline table.
    pub fn is_table(&self, path: &ConfigPath) -> bool {
        self.item(path).is_some_and(Item::is_table_like)
    }

    /// Remove the value at `path`. Returns whether anything was removed.
    pub fn remove(&mut self, path: &ConfigPath) -> bool {
        let (parents, key) = path.parent_and_key();
        self.parent_mut(parents)
            .and_then(|parent| parent.remove(key))
            .is_some_and(|item| !item.is_none())
    }

    /// Document text as it will be written to disk.
    ///
    /// A commented table opens with a blank line, dropped when nothing
    /// comes before it.
    pub fn render(&self) -> String {
        let text = self.doc.to_string();
        match text.strip_prefix('\n') {
            Some(rest) => rest.to_string(),
            None => text,
        }
    }

    pub fn as_document(&self) -> &DocumentMut {
        &self.doc
    }

    fn item(&self, path: &ConfigPath) -> Option<&Item> {
        let (parents, key) = path.parent_and_key();
        let mut current: &dyn TableLike = self.doc.as_table();
        for segment in parents {
            current = current.get(segment)?.as_table_like()?;
        }
        current.get(key)
    }

    fn parent_mut(&mut self, parents: &[String]) -> Option<&mut dyn TableLike> {
        let mut current: &mut dyn TableLike = self.doc.as_table_mut();
        for segment in parents {
            current = current.get_mut(segment)?.as_table_like_mut()?;
        }
        Some(current)
    }
}

impl fmt::Display for TomlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<DocumentMut> for TomlDocument {
    fn from(doc: DocumentMut) -> Self {
        Self { doc }
    }
}
