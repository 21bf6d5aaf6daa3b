//! Section layout for serialized settings.
//!
//! Serde output nests structs as inline tables. Fields the schema declares
//! as sections are rewritten to standard `[table]` headers, and section
//! lists to `[[array-of-tables]]`, so they can carry comments.

use cfgbind_core::{FieldKind, Schema};
use toml_edit::{ArrayOfTables, Item, Table, Value};

/// Rewrite the sections `schema` declares inside `table`, recursively.
///
/// Keys not declared as sections keep whatever shape serde gave them.
pub fn layout_sections(table: &mut Table, schema: &Schema) {
    for field in schema.fields() {
        let key = field.key();
        let Some(item) = table.get_mut(key) else {
            continue;
        };

        match field.kind() {
            FieldKind::Value => continue,
            FieldKind::Section(nested) => {
                explode_table(item);
                if let Some(sub) = item.as_table_mut() {
                    layout_sections(sub, nested);
                }
            }
            FieldKind::SectionList(nested) => {
                explode_table_array(item);
                if let Some(tables) = item.as_array_of_tables_mut() {
                    for sub in tables.iter_mut() {
                        layout_sections(sub, nested);
                    }
                }
            }
        }

        // A key written as `key = ` keeps its trailing space inside a header.
        if let Some(mut key) = table.key_mut(key) {
            key.leaf_decor_mut().clear();
        }
    }
}

fn explode_table(item: &mut Item) {
    *item = match std::mem::take(item) {
        Item::Value(Value::InlineTable(inline)) => Item::Table(inline.into_table()),
        other => other,
    };
}

// Empty arrays stay `key = []`: an empty array of tables renders nothing.
fn explode_table_array(item: &mut Item) {
    *item = match std::mem::take(item) {
        Item::Value(Value::Array(array))
            if !array.is_empty() && array.iter().all(Value::is_inline_table) =>
        {
            let mut tables = ArrayOfTables::new();
            for value in array {
                if let Value::InlineTable(inline) = value {
                    tables.push(inline.into_table());
                }
            }
            Item::ArrayOfTables(tables)
        }
        other => other,
    };
}
