use std::path::{Path, PathBuf};

use datapack_fetch::DownloadSource;
use datapack_state::JsonStore;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "datapack.toml";

/// Settings layered from defaults, `datapack.toml`, then `DATAPACK_*`
/// environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatapackConfig {
    /// Directory installed packs are copied into.
    pub content_store: PathBuf,
    /// JSON metadata document.
    pub metadata:      PathBuf,
    /// Mirrors tried in order after any given on the command line.
    pub sources:       Vec<DownloadSource>,
    pub log_level:     String,
}

impl Default for DatapackConfig {
    fn default() -> Self {
        Self {
            content_store: PathBuf::from("Data").join("Packs"),
            metadata:      PathBuf::from("datapack.json"),
            sources:       Vec::new(),
            log_level:     "info".to_string(),
        }
    }
}

impl DatapackConfig {
    /// A missing config file is not an error; defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let path = path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        Self::figment(path).merge(Env::prefixed("DATAPACK_")).extract()
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Toml::file(path))
    }

    pub fn open_store(&self) -> datapack_state::Result<JsonStore> { JsonStore::open(&self.metadata) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config: DatapackConfig = DatapackConfig::figment(&dir.path().join("absent.toml"))
            .extract()
            .unwrap();
        assert_eq!(config, DatapackConfig::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datapack.toml");
        std::fs::write(
            &path,
            r#"
content_store = "/srv/packs"

[[sources]]
name = "Primary"
base_url = "https://packs.example.net/data/"

[[sources]]
name = "Backup"
base_url = "https://backup.example.org/"
"#,
        )
        .unwrap();

        let config: DatapackConfig = DatapackConfig::figment(&path).extract().unwrap();
        assert_eq!(config.content_store, PathBuf::from("/srv/packs"));
        assert_eq!(config.metadata, PathBuf::from("datapack.json"));
        assert_eq!(config.log_level, "info");
        let names: Vec<_> = config.sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Primary", "Backup"]);
    }
}
