//! Binding between a settings value and its file on disk.

use crate::only_if::RemovalRules;
use cfgbind_core::{Config, ConfigError, Result, Schema, Translator};
use cfgbind_toml::TomlDocument;
use std::fs;
use std::io::ErrorKind;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

/// A settings value kept in sync with a commented TOML file.
///
/// Loading maps the file onto `T`, keeping `T`'s defaults for missing keys.
/// Saving regenerates the whole file from `T` and its schema: sections are
/// laid out as tables, missing keys receive their (translated) default
/// values, comments are attached, and conditional fields whose switch is
/// off are dropped.
///
/// # Examples
///
/// ```no_run
/// use cfgbind::{Config, ConfigFile, ConfigSection, FieldSpec, Schema};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// #[serde(default)]
/// struct Settings {
///     name: Option<String>,
/// }
///
/// impl ConfigSection for Settings {
///     fn schema() -> Schema {
///         Schema::new().field(FieldSpec::value("name").comment("Display name").default_value("Steve"))
///     }
/// }
///
/// impl Config for Settings {}
///
/// # fn main() -> cfgbind::Result<()> {
/// let config = ConfigFile::<Settings>::open("config/settings.toml")?;
/// assert_eq!(config.name.as_deref(), Some("Steve"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigFile<T: Config> {
    path: PathBuf,
    settings: T,
    schema: Schema,
    translator: Translator,
    removal_rules: RemovalRules,
}

impl<T: Config> ConfigFile<T> {
    /// Bind `T::default()` to `path` without touching the file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSchema`] if `T::schema()` is invalid.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_translator(path, Translator::identity())
    }

    /// Like [`ConfigFile::new`], translating comments and defaults on save.
    pub fn with_translator(path: impl Into<PathBuf>, translator: Translator) -> Result<Self> {
        let schema = T::schema();
        schema.validate()?;

        Ok(Self {
            path: path.into(),
            settings: T::default(),
            schema,
            translator,
            removal_rules: RemovalRules::new(),
        })
    }

    /// Bind to `path` and run [`ConfigFile::load_and_correct`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut file = Self::new(path)?;
        file.load_and_correct()?;
        Ok(file)
    }

    /// Load the file, let `T` adjust itself, and write the corrected file.
    pub fn load_and_correct(&mut self) -> Result<()> {
        self.load()?;
        self.settings.between_load_and_save();
        self.save()
    }

    /// Read the file onto the settings value.
    ///
    /// A missing file is created empty, parent directories included.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Io`] if the file cannot be read or created
    /// - [`ConfigError::Parse`] if the file is not valid TOML
    /// - [`ConfigError::Deserialize`] if the values do not fit `T`
    pub fn load(&mut self) -> Result<()> {
        let content = read_or_create(&self.path)?;
        self.apply_loaded(&content)
    }

    /// Regenerate the file from the settings value.
    ///
    /// Nothing is written if the document cannot be built.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Serialize`] if `T` has no TOML representation
    /// - [`ConfigError::Deserialize`] if a default does not fit its field
    /// - [`ConfigError::Io`] if the file cannot be written
    pub fn save(&mut self) -> Result<()> {
        let content = self.render()?;
        write_file(&self.path, &content)
    }

    fn apply_loaded(&mut self, content: &str) -> Result<()> {
        let doc = TomlDocument::parse(content)
            .map_err(|e| ConfigError::from(e).with_path(&self.path))?;

        let removal_rules = RemovalRules::collect(&doc, &self.schema)?;
        let settings = doc.to_settings()?;
        self.removal_rules = removal_rules;
        self.settings = settings;

        tracing::debug!(
            "Loaded {:?} ({} bytes, {} conditional fields absent)",
            self.path,
            content.len(),
            self.removal_rules.len()
        );
        Ok(())
    }

    fn render(&mut self) -> Result<String> {
        let mut doc = TomlDocument::from_settings(&self.settings, &self.schema)?;
        let correction = doc.correct(&self.schema, &self.translator);

        if correction.changed_values() {
            // Reload so the settings see the defaults, then rebuild to keep
            // keys in field order.
            self.settings = doc.to_settings()?;
            doc = TomlDocument::from_settings(&self.settings, &self.schema)?;
            doc.correct(&self.schema, &self.translator);
        }

        let removed = self.removal_rules.apply(&mut doc);
        tracing::debug!(
            "Corrected {:?}: {} defaults, {} comments, {} conditional fields removed",
            self.path,
            correction.defaults_applied,
            correction.comments_applied,
            removed
        );

        Ok(doc.render())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> &T {
        &self.settings
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.settings
    }

    pub fn into_inner(self) -> T {
        self.settings
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Conditional fields that were absent at the last load.
    pub fn removal_rules(&self) -> &RemovalRules {
        &self.removal_rules
    }
}

#[cfg(feature = "tokio")]
impl<T: Config> ConfigFile<T> {
    /// Async variant of [`ConfigFile::load`] using `tokio::fs`.
    pub async fn load_async(&mut self) -> Result<()> {
        let content = read_or_create_async(&self.path).await?;
        self.apply_loaded(&content)
    }

    /// Async variant of [`ConfigFile::save`] using `tokio::fs`.
    pub async fn save_async(&mut self) -> Result<()> {
        let content = self.render()?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| ConfigError::io(&self.path, e))?;
        tracing::debug!("Wrote {:?}", self.path);
        Ok(())
    }

    /// Async variant of [`ConfigFile::load_and_correct`].
    pub async fn load_and_correct_async(&mut self) -> Result<()> {
        self.load_async().await?;
        self.settings.between_load_and_save();
        self.save_async().await
    }
}

impl<T: Config> Deref for ConfigFile<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.settings
    }
}

impl<T: Config> DerefMut for ConfigFile<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.settings
    }
}

fn read_or_create(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => {
            tracing::debug!("Read {:?} ({} bytes)", path, content.len());
            Ok(content)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!("Config file {:?} not found, creating it", path);
            if let Some(parent) = parent_dir(path) {
                fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
            }
            fs::write(path, "").map_err(|e| ConfigError::io(path, e))?;
            Ok(String::new())
        }
        Err(e) => Err(ConfigError::io(path, e)),
    }
}

#[cfg(feature = "tokio")]
async fn read_or_create_async(path: &Path) -> Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            tracing::debug!("Read {:?} ({} bytes)", path, content.len());
            Ok(content)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!("Config file {:?} not found, creating it", path);
            if let Some(parent) = parent_dir(path) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| ConfigError::io(parent, e))?;
            }
            tokio::fs::write(path, "")
                .await
                .map_err(|e| ConfigError::io(path, e))?;
            Ok(String::new())
        }
        Err(e) => Err(ConfigError::io(path, e)),
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| ConfigError::io(path, e))?;
    tracing::debug!("Wrote {:?} ({} bytes)", path, content.len());
    Ok(())
}

// `Path::parent` yields "" for bare file names.
fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}
