use cfgbind::{Config, ConfigFile, ConfigSection, FieldSpec, Schema};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "config/example-config.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Category {
    field_in_category: Option<String>,
}

impl ConfigSection for Category {
    fn schema() -> Schema {
        Schema::new().field(
            FieldSpec::value("field_in_category")
                .comment("A value that only exists while the category is enabled")
                .default_value("Inside the category"),
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct Server {
    host: Option<String>,
    port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: None,
            port: 25565,
        }
    }
}

impl ConfigSection for Server {
    fn schema() -> Schema {
        Schema::new()
            .field(FieldSpec::value("host").default_value("localhost"))
            .field(FieldSpec::value("port").comment("TCP port"))
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct ExampleConfig {
    name: Option<String>,
    category_enabled: bool,
    category: Category,
    servers: Vec<Server>,
}

impl ConfigSection for ExampleConfig {
    fn schema() -> Schema {
        Schema::new()
            .field(
                FieldSpec::value("name")
                    .comment("Name shown to other players")
                    .default_value("Steve"),
            )
            .field(FieldSpec::value("category_enabled").comment("Generate the category section"))
            .field(
                FieldSpec::section("category", Category::schema())
                    .comment("Optional settings")
                    .only_if("category_enabled"),
            )
            .field(FieldSpec::section_list("servers", Server::schema()).comment("Servers to join"))
    }
}

impl Config for ExampleConfig {
    fn between_load_and_save(&mut self) {
        if self.servers.is_empty() {
            self.servers.push(Server::default());
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    tracing::info!(
        "{} {} loading {:?}",
        cfgbind::IMPLEMENTATION_TITLE,
        cfgbind::IMPLEMENTATION_VERSION,
        path
    );

    match ConfigFile::<ExampleConfig>::open(&path) {
        Ok(config) => {
            tracing::info!("Loaded config");
            tracing::debug!("{:?}", config.get());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to load {:?}: {}", path, e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_schema_is_valid() {
        assert!(ExampleConfig::schema().validate().is_ok());
    }

    #[test]
    fn test_first_run_writes_full_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config/example-config.toml");

        let config = ConfigFile::<ExampleConfig>::open(&path).unwrap();
        assert_eq!(config.name.as_deref(), Some("Steve"));
        assert_eq!(config.servers.len(), 1);
        assert_eq!(config.servers[0].host.as_deref(), Some("localhost"));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("# Name shown to other players\nname = \"Steve\""));
        assert!(content.contains("category_enabled = false"));
        assert!(!content.contains("[category]"));
        assert!(content.contains("# Servers to join\n[[servers]]"));
        assert!(content.contains("host = \"localhost\""));
        assert!(content.contains("# TCP port\nport = 25565"));
    }

    #[test]
    fn test_enabling_category_generates_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("example-config.toml");

        ConfigFile::<ExampleConfig>::open(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        fs::write(
            &path,
            content.replace("category_enabled = false", "category_enabled = true"),
        )
        .unwrap();

        let config = ConfigFile::<ExampleConfig>::open(&path).unwrap();
        assert_eq!(
            config.category.field_in_category.as_deref(),
            Some("Inside the category")
        );
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("# Optional settings\n[category]"));
        assert!(content.contains("field_in_category = \"Inside the category\""));
    }
}
