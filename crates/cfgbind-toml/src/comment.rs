//! Comment placement through `toml_edit` decor.

use toml_edit::{Item, Table};

/// Turn free text into TOML comment lines.
///
/// Each line gets a `# ` prefix (a bare `#` for blank lines), and the
/// result ends with a newline so it can sit directly above a key.
///
/// # Examples
///
/// ```
/// use cfgbind_toml::format_comment;
///
/// assert_eq!(format_comment("Display name"), "# Display name\n");
/// assert_eq!(format_comment("first\n\nthird"), "# first\n#\n# third\n");
/// ```
pub fn format_comment(text: &str) -> String {
    let mut out = String::new();
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            out.push_str("#\n");
        } else {
            out.push_str("# ");
            out.push_str(line);
            out.push('\n');
        }
    }
    if out.is_empty() {
        out.push_str("#\n");
    }
    out
}

enum Target {
    Value,
    Table,
    TableArray,
}

/// Attach a comment to `key` inside `table`.
///
/// Values carry the comment in their key's leaf decor. Tables and arrays of
/// tables carry it above their header, separated from the previous entry by
/// a blank line. Returns `false` when the key is absent or an empty array.
pub(crate) fn set_comment_in(table: &mut Table, key: &str, text: &str) -> bool {
    let target = match table.get(key) {
        Some(Item::Value(_)) => Target::Value,
        Some(Item::Table(_)) => Target::Table,
        Some(Item::ArrayOfTables(_)) => Target::TableArray,
        Some(Item::None) | None => return false,
    };

    let comment = format_comment(text);
    match target {
        Target::Value => match table.key_mut(key) {
            Some(mut key) => {
                key.leaf_decor_mut().set_prefix(comment);
                true
            }
            None => false,
        },
        Target::Table => match table.get_mut(key).and_then(Item::as_table_mut) {
            Some(sub) => {
                sub.decor_mut().set_prefix(format!("\n{comment}"));
                true
            }
            None => false,
        },
        Target::TableArray => match table
            .get_mut(key)
            .and_then(Item::as_array_of_tables_mut)
            .and_then(|tables| tables.get_mut(0))
        {
            Some(first) => {
                first.decor_mut().set_prefix(format!("\n{comment}"));
                true
            }
            None => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml_edit::DocumentMut;

    #[test]
    fn test_format_single_line() {
        assert_eq!(format_comment("Enable the feature"), "# Enable the feature\n");
    }

    #[test]
    fn test_format_multi_line() {
        assert_eq!(format_comment("one\ntwo"), "# one\n# two\n");
        assert_eq!(format_comment("trailing   \n"), "# trailing\n");
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_comment(""), "#\n");
    }

    #[test]
    fn test_comment_on_value() {
        let mut doc: DocumentMut = "name = \"Steve\"\n".parse().unwrap();
        assert!(set_comment_in(doc.as_table_mut(), "name", "Display name"));
        assert_eq!(doc.to_string(), "# Display name\nname = \"Steve\"\n");
    }

    #[test]
    fn test_comment_on_table() {
        let mut doc: DocumentMut = "a = 1\n\n[category]\nx = 2\n".parse().unwrap();
        assert!(set_comment_in(doc.as_table_mut(), "category", "A category"));
        assert!(doc.to_string().contains("# A category\n[category]\n"));
    }

    #[test]
    fn test_comment_on_array_of_tables() {
        let mut doc: DocumentMut = "[[servers]]\nhost = \"a\"\n\n[[servers]]\nhost = \"b\"\n"
            .parse()
            .unwrap();
        assert!(set_comment_in(doc.as_table_mut(), "servers", "Servers"));
        let rendered = doc.to_string();
        assert_eq!(rendered.matches("# Servers").count(), 1);
        assert!(rendered.contains("# Servers\n[[servers]]\nhost = \"a\""));
    }

    #[test]
    fn test_comment_on_missing_key() {
        let mut doc = DocumentMut::new();
        assert!(!set_comment_in(doc.as_table_mut(), "missing", "Nothing"));
        assert_eq!(doc.to_string(), "");
    }
}
