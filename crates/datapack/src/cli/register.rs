use anyhow::{Context, Result, bail};
use clap::Args;
use datapack_state::{CatalogEntry, MetadataStore};

use crate::config::DatapackConfig;

#[derive(Args, Clone, Debug)]
pub struct RegisterArg {
    /// Id of the new catalog entry.
    pub entry: String,

    #[arg(long, default_value = "")]
    pub title: String,
}

impl RegisterArg {
    pub async fn run(self, config: &DatapackConfig) -> Result<()> {
        if !is_valid_entry_id(&self.entry) {
            bail!("catalog entry id {:?} must not be empty or contain path separators", self.entry);
        }
        let store = config.open_store().context("failed to open metadata store")?;
        if store.find_catalog_entry(&self.entry).await?.is_some() {
            bail!("catalog entry {:?} already exists", self.entry);
        }

        let title = if self.title.is_empty() { self.entry.clone() } else { self.title };
        store
            .save_catalog_entry(CatalogEntry::new(&self.entry, title))
            .await?;
        println!("Registered {}", self.entry);
        Ok(())
    }
}

/// Entry ids become part of pack file names, so they must stay one path
/// component.
fn is_valid_entry_id(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_id_must_be_one_component() {
        assert!(is_valid_entry_id("game-1"));
        assert!(!is_valid_entry_id(""));
        assert!(!is_valid_entry_id(".."));
        assert!(!is_valid_entry_id("../escape"));
        assert!(!is_valid_entry_id("a\\b"));
    }
}
