//! Field declarations for settings types.
//!
//! A [`Schema`] lists the keys of one table in the order they are written,
//! together with what the binder should do for each: attach a comment, fill
//! in a default, break the value down into a sub-table, or drop it unless a
//! boolean switch is on.

use crate::error::{ConfigError, Result};
use crate::path::ConfigPath;
use std::collections::HashSet;

/// How a field is laid out in the document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Stored directly under its key.
    Value,
    /// Broken down into a `[key]` table described by the nested schema.
    Section(Schema),
    /// An array of `[[key]]` tables, each described by the nested schema.
    SectionList(Schema),
}

/// One declared key of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    key: String,
    kind: FieldKind,
    comment: Option<String>,
    default_value: Option<String>,
    only_if: Option<String>,
}

impl FieldSpec {
    fn with_kind(key: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            kind,
            comment: None,
            default_value: None,
            only_if: None,
        }
    }

    /// A plain value field.
    pub fn value(key: impl Into<String>) -> Self {
        Self::with_kind(key, FieldKind::Value)
    }

    /// A field broken down into its own table.
    pub fn section(key: impl Into<String>, schema: Schema) -> Self {
        Self::with_kind(key, FieldKind::Section(schema))
    }

    /// A list field whose elements are tables.
    pub fn section_list(key: impl Into<String>, schema: Schema) -> Self {
        Self::with_kind(key, FieldKind::SectionList(schema))
    }

    /// Comment written above the key, passed through the translator.
    #[must_use]
    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.comment = Some(text.into());
        self
    }

    /// Text written when the key is missing, passed through the translator.
    ///
    /// Defaults are always written as strings.
    #[must_use]
    pub fn default_value(mut self, text: impl Into<String>) -> Self {
        self.default_value = Some(text.into());
        self
    }

    /// Only generate this key when the boolean at `condition` is `true`.
    ///
    /// `condition` is a dotted path from the document root. A key that was
    /// already in the file is kept whatever the condition says.
    #[must_use]
    pub fn only_if(mut self, condition: impl Into<String>) -> Self {
        self.only_if = Some(condition.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn comment_text(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn default_text(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn condition(&self) -> Option<&str> {
        self.only_if.as_deref()
    }

    /// Nested schema for sections and section lists.
    pub fn nested(&self) -> Option<&Schema> {
        match &self.kind {
            FieldKind::Value => None,
            FieldKind::Section(schema) | FieldKind::SectionList(schema) => Some(schema),
        }
    }
}

/// Ordered field declarations of one table.
///
/// # Examples
///
/// ```
/// use cfgbind_core::{FieldSpec, Schema};
///
/// let category = Schema::new().field(FieldSpec::value("field_in_category"));
/// let schema = Schema::new()
///     .field(FieldSpec::value("name").comment("Display name").default_value("Steve"))
///     .field(FieldSpec::value("category_enabled"))
///     .field(FieldSpec::section("category", category).only_if("category_enabled"));
///
/// assert!(schema.validate().is_ok());
/// assert_eq!(schema.fields().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check the schema and every nested schema.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSchema`] when:
    /// - a key is empty or contains a dot
    /// - a key is declared twice in the same table
    /// - a section or section list declares a default value
    /// - an `only_if` condition is not a valid dotted path
    pub fn validate(&self) -> Result<()> {
        self.validate_at(None)
    }

    fn validate_at(&self, parent: Option<&ConfigPath>) -> Result<()> {
        let mut seen = HashSet::new();

        for field in &self.fields {
            let location = match parent {
                Some(parent) => format!("{}.{}", parent, field.key),
                None => field.key.clone(),
            };

            if field.key.is_empty() {
                return Err(ConfigError::invalid_schema(match parent {
                    Some(parent) => format!("empty key in '{parent}'"),
                    None => "empty key at document root".to_string(),
                }));
            }
            if field.key.contains('.') {
                return Err(ConfigError::invalid_schema(format!(
                    "key '{location}' contains a dot; declare a section instead"
                )));
            }
            if !seen.insert(field.key.as_str()) {
                return Err(ConfigError::invalid_schema(format!(
                    "duplicate key '{location}'"
                )));
            }
            if field.default_value.is_some() && field.nested().is_some() {
                return Err(ConfigError::invalid_schema(format!(
                    "section '{location}' cannot have a default value"
                )));
            }
            if let Some(condition) = &field.only_if {
                ConfigPath::parse(condition).map_err(|_| {
                    ConfigError::invalid_schema(format!(
                        "condition '{condition}' of '{location}' is not a valid path"
                    ))
                })?;
            }

            if let Some(nested) = field.nested() {
                let path = crate::path::child_path(parent, &field.key);
                nested.validate_at(Some(&path))?;
            }
        }

        Ok(())
    }
}
