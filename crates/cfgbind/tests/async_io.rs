//! Async file IO. Declared with `required-features = ["tokio"]`.

use cfgbind::{Config, ConfigFile, ConfigSection, FieldSpec, Schema};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Settings {
    name: Option<String>,
    retries: u32,
}

impl ConfigSection for Settings {
    fn schema() -> Schema {
        Schema::new()
            .field(
                FieldSpec::value("name")
                    .comment("Display name")
                    .default_value("Steve"),
            )
            .field(FieldSpec::value("retries"))
    }
}

impl Config for Settings {
    fn between_load_and_save(&mut self) {
        if self.retries == 0 {
            self.retries = 3;
        }
    }
}

#[tokio::test]
async fn test_load_and_correct_async_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("async").join("settings.toml");

    let mut file = ConfigFile::<Settings>::new(&path).unwrap();
    file.load_and_correct_async().await.unwrap();

    assert_eq!(file.name.as_deref(), Some("Steve"));
    assert_eq!(file.retries, 3);

    let content = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(content, "# Display name\nname = \"Steve\"\nretries = 3\n");
}

#[tokio::test]
async fn test_async_matches_sync_output() {
    let dir = tempfile::tempdir().unwrap();
    let sync_path = dir.path().join("sync.toml");
    let async_path = dir.path().join("async.toml");

    ConfigFile::<Settings>::open(&sync_path).unwrap();
    ConfigFile::<Settings>::new(&async_path)
        .unwrap()
        .load_and_correct_async()
        .await
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(&sync_path).unwrap(),
        std::fs::read_to_string(&async_path).unwrap()
    );
}
