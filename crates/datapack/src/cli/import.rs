use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use datapack_fetch::ReqwestClient;
use datapack_install::{ImportOptions, PackInstaller, WriteQueue};

use crate::config::DatapackConfig;

#[derive(Args, Clone, Debug)]
pub struct ImportArg {
    /// Catalog entry the pack belongs to.
    pub entry: String,

    /// Pack file to install.
    pub file: PathBuf,

    /// Expected SHA-256 of the file, in hex.
    #[arg(long, value_name = "HEX")]
    pub sha256: String,

    /// Copy the file instead of moving it.
    #[arg(long)]
    pub keep_source: bool,
}

impl ImportArg {
    pub async fn run(self, config: &DatapackConfig) -> Result<()> {
        let store = Arc::new(config.open_store().context("failed to open metadata store")?);
        let client = ReqwestClient::new().context("failed to build HTTP client")?;
        let installer = PackInstaller::new(client, store);
        let options = ImportOptions::default()
            .keep_source(self.keep_source)
            .write_queue(WriteQueue::new());

        let record = installer
            .import_already_downloaded_pack(
                &self.entry,
                &self.file,
                &config.content_store,
                &self.sha256,
                None,
                &options,
            )
            .await?;

        println!(
            "Imported {} as {} (record {})",
            self.file.display(),
            record.path.as_deref().unwrap_or_default(),
            record.id.map_or_else(|| "?".to_string(), |id| id.to_string())
        );
        Ok(())
    }
}
