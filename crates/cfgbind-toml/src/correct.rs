//! Default values and comments for a freshly serialized document.

use crate::comment::set_comment_in;
use cfgbind_core::path::child_path;
use cfgbind_core::{ConfigPath, FieldKind, Schema, Translator};
use toml_edit::{Item, Table};

/// What [`correct`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Correction {
    /// Keys that were missing and received their default value.
    pub defaults_applied: usize,
    /// Keys that received a comment.
    pub comments_applied: usize,
}

impl Correction {
    /// Whether values changed, meaning the settings must be reloaded.
    pub fn changed_values(&self) -> bool {
        self.defaults_applied > 0
    }
}

/// Walk `schema` over `table`, filling defaults and attaching comments.
///
/// For each declared field, in schema order:
/// - a missing key with a default gets the translated default as a string
/// - a section list recurses into every element table
/// - a section present as a table recurses into it
/// - a present key with a comment gets the translated comment
pub fn correct(table: &mut Table, schema: &Schema, translator: &Translator) -> Correction {
    let mut correction = Correction::default();
    correct_table(table, schema, translator, None, &mut correction);
    correction
}

fn correct_table(
    table: &mut Table,
    schema: &Schema,
    translator: &Translator,
    parent: Option<&ConfigPath>,
    correction: &mut Correction,
) {
    for field in schema.fields() {
        let key = field.key();
        let path = child_path(parent, key);

        if let Some(default) = field.default_text() {
            if !table.contains_key(key) {
                let value = translator.translate(default);
                tracing::trace!("Applying default for '{}': {:?}", path, value);
                table.insert(key, toml_edit::value(value));
                correction.defaults_applied += 1;
            }
        } else {
            match field.kind() {
                FieldKind::SectionList(nested) => {
                    if let Some(tables) = table.get_mut(key).and_then(Item::as_array_of_tables_mut)
                    {
                        for sub in tables.iter_mut() {
                            correct_table(sub, nested, translator, Some(&path), correction);
                        }
                    }
                }
                FieldKind::Section(nested) => {
                    if let Some(sub) = table.get_mut(key).and_then(Item::as_table_mut) {
                        correct_table(sub, nested, translator, Some(&path), correction);
                    }
                }
                FieldKind::Value => {}
            }
        }

        if let Some(comment) = field.comment_text()
            && set_comment_in(table, key, &translator.translate(comment))
        {
            tracing::trace!("Commented '{}'", path);
            correction.comments_applied += 1;
        }
    }
}
