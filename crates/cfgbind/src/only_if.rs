//! Conditional fields.
//!
//! A field declared with `only_if("switch")` is only generated while the
//! boolean at `switch` is `true`. The rule is tracked per file: a field that
//! was absent when the file was loaded is removed again on save if its
//! switch is off. A field the user already had in the file is never removed.

use cfgbind_core::path::child_path;
use cfgbind_core::{ConfigPath, FieldKind, Result, Schema};
use cfgbind_toml::TomlDocument;

/// A field to drop on save unless `condition` is `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalRule {
    pub condition: ConfigPath,
    pub path: ConfigPath,
}

/// Removal rules recorded from the last loaded document.
#[derive(Debug, Clone, Default)]
pub struct RemovalRules {
    rules: Vec<RemovalRule>,
}

impl RemovalRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `path` depends on `condition`.
    ///
    /// Several paths may share one condition.
    pub fn record(&mut self, condition: ConfigPath, path: ConfigPath) {
        self.rules.push(RemovalRule { condition, path });
    }

    /// Build the rules for a freshly loaded document.
    ///
    /// Every conditional field absent from `doc` gets a rule. Sections
    /// present as tables are searched recursively; section lists are not.
    ///
    /// # Errors
    ///
    /// Returns [`cfgbind_core::ConfigError::InvalidPath`] if a condition is
    /// not a valid path. Validated schemas never trigger this.
    pub fn collect(doc: &TomlDocument, schema: &Schema) -> Result<Self> {
        let mut rules = Self::new();
        rules.collect_in(doc, schema, None)?;
        Ok(rules)
    }

    fn collect_in(
        &mut self,
        doc: &TomlDocument,
        schema: &Schema,
        parent: Option<&ConfigPath>,
    ) -> Result<()> {
        for field in schema.fields() {
            let path = child_path(parent, field.key());

            if let Some(condition) = field.condition()
                && !doc.contains(&path)
            {
                tracing::trace!("'{}' absent at load, depends on '{}'", path, condition);
                self.record(ConfigPath::parse(condition)?, path.clone());
            }

            if let FieldKind::Section(nested) = field.kind()
                && doc.is_table(&path)
            {
                self.collect_in(doc, nested, Some(&path))?;
            }
        }
        Ok(())
    }

    /// Remove every path whose condition is not `true`.
    ///
    /// A missing or non-boolean condition counts as `false`. Returns how
    /// many paths were removed.
    pub fn apply(&self, doc: &mut TomlDocument) -> usize {
        let mut removed = 0;

        for rule in &self.rules {
            match doc.get_bool(&rule.condition) {
                Some(true) => continue,
                Some(false) => {}
                None => {
                    tracing::warn!(
                        "Condition '{}' for '{}' is not a boolean, treating it as false",
                        rule.condition,
                        rule.path
                    );
                }
            }

            if doc.remove(&rule.path) {
                tracing::debug!("Removed '{}' since '{}' is off", rule.path, rule.condition);
                removed += 1;
            }
        }

        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &RemovalRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfgbind_core::FieldSpec;

    fn path(p: &str) -> ConfigPath {
        ConfigPath::parse(p).unwrap()
    }

    fn schema() -> Schema {
        let extras = Schema::new()
            .field(FieldSpec::value("verbose"))
            .field(FieldSpec::value("trace_file").only_if("extras.verbose"));
        Schema::new()
            .field(FieldSpec::value("extras_enabled"))
            .field(FieldSpec::section("extras", extras).only_if("extras_enabled"))
            .field(FieldSpec::value("motd").only_if("extras_enabled"))
    }

    #[test]
    fn test_collect_absent_fields() {
        let doc = TomlDocument::parse("extras_enabled = false\n").unwrap();
        let rules = RemovalRules::collect(&doc, &schema()).unwrap();

        let paths: Vec<_> = rules.iter().map(|r| r.path.to_string()).collect();
        assert_eq!(paths, ["extras", "motd"]);
        assert!(rules.iter().all(|r| r.condition == path("extras_enabled")));
    }

    #[test]
    fn test_collect_present_fields_are_kept() {
        let doc = TomlDocument::parse("motd = \"hi\"\n\n[extras]\nverbose = true\ntrace_file = \"t\"\n")
            .unwrap();
        let rules = RemovalRules::collect(&doc, &schema()).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn test_collect_recurses_into_present_sections() {
        let doc = TomlDocument::parse("[extras]\nverbose = false\n").unwrap();
        let rules = RemovalRules::collect(&doc, &schema()).unwrap();

        assert_eq!(rules.len(), 2);
        assert!(rules.iter().any(|r| r.path == path("extras.trace_file")
            && r.condition == path("extras.verbose")));
    }

    #[test]
    fn test_apply_removes_when_condition_false() {
        let mut rules = RemovalRules::new();
        rules.record(path("enabled"), path("section"));
        rules.record(path("enabled"), path("motd"));

        let mut doc =
            TomlDocument::parse("enabled = false\nmotd = \"x\"\n\n[section]\na = 1\n").unwrap();
        assert_eq!(rules.apply(&mut doc), 2);
        assert_eq!(doc.render(), "enabled = false\n");
    }

    #[test]
    fn test_apply_keeps_when_condition_true() {
        let mut rules = RemovalRules::new();
        rules.record(path("enabled"), path("motd"));

        let mut doc = TomlDocument::parse("enabled = true\nmotd = \"x\"\n").unwrap();
        assert_eq!(rules.apply(&mut doc), 0);
        assert!(doc.contains(&path("motd")));
    }

    #[test]
    fn test_apply_missing_or_non_bool_condition_counts_as_false() {
        let mut rules = RemovalRules::new();
        rules.record(path("missing"), path("a"));
        rules.record(path("text"), path("b"));

        let mut doc = TomlDocument::parse("text = \"yes\"\na = 1\nb = 2\n").unwrap();
        assert_eq!(rules.apply(&mut doc), 2);
        assert!(!doc.contains(&path("a")));
        assert!(!doc.contains(&path("b")));
    }

    #[test]
    fn test_clear() {
        let mut rules = RemovalRules::new();
        rules.record(path("a"), path("b"));
        assert_eq!(rules.len(), 1);
        rules.clear();
        assert!(rules.is_empty());
    }
}
