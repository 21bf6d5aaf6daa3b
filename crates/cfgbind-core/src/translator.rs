//! Translation of comments and default values.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Maps comment and default-value text to the text written into the file.
///
/// Schemas usually hold translation keys or text in one language. The
/// translator turns them into the text for the user's locale right before
/// the file is written. Cloning is cheap.
///
/// # Examples
///
/// ```
/// use cfgbind_core::Translator;
/// use std::collections::HashMap;
///
/// let fr = Translator::from_map(HashMap::from([(
///     "config.name.comment".to_string(),
///     "Le nom affiché".to_string(),
/// )]));
/// assert_eq!(fr.translate("config.name.comment"), "Le nom affiché");
/// assert_eq!(fr.translate("untranslated"), "untranslated");
/// ```
#[derive(Clone)]
pub struct Translator {
    inner: Arc<dyn Fn(&str) -> String + Send + Sync>,
}

impl Translator {
    /// Returns every text unchanged.
    pub fn identity() -> Self {
        Self::new(str::to_string)
    }

    pub fn new(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self { inner: Arc::new(f) }
    }

    /// Look texts up in a table, falling back to the text itself.
    pub fn from_map(map: HashMap<String, String>) -> Self {
        Self::new(move |text| map.get(text).cloned().unwrap_or_else(|| text.to_string()))
    }

    pub fn translate(&self, text: &str) -> String {
        (self.inner)(text)
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let t = Translator::default();
        assert_eq!(t.translate("Hello"), "Hello");
        assert_eq!(t.translate(""), "");
    }

    #[test]
    fn test_closure() {
        let t = Translator::new(|s| s.to_uppercase());
        assert_eq!(t.translate("enabled"), "ENABLED");
    }

    #[test]
    fn test_clone_shares_function() {
        let t = Translator::new(|s| format!("[{s}]"));
        let copy = t.clone();
        assert_eq!(copy.translate("x"), "[x]");
    }
}
