use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use datapack_fetch::{CancellationToken, DownloadDetails, DownloadSource, Progress, ReqwestClient};
use datapack_install::{InstallOptions, PackInstaller, WriteQueue};

use crate::config::DatapackConfig;
use crate::ui::tracker::ProgressTracker;

#[derive(Args, Clone, Debug)]
pub struct InstallArg {
    /// Catalog entry whose active data pack is installed.
    pub entry: String,

    /// Extra mirror, tried before the configured ones. Repeatable.
    #[arg(long = "source", value_name = "NAME=URL", value_parser = parse_source)]
    pub sources: Vec<DownloadSource>,
}

fn parse_source(s: &str) -> Result<DownloadSource, String> {
    match s.split_once('=') {
        Some((name, url)) if !name.trim().is_empty() && !url.trim().is_empty() => {
            Ok(DownloadSource::new(name.trim(), url.trim()))
        }
        _ => Err(format!("expected NAME=URL, got {s:?}")),
    }
}

impl InstallArg {
    pub async fn run(self, config: &DatapackConfig) -> Result<()> {
        let mut sources = self.sources;
        sources.extend(config.sources.iter().cloned());

        let store = Arc::new(config.open_store().context("failed to open metadata store")?);
        let client = ReqwestClient::new().context("failed to build HTTP client")?;
        let installer = PackInstaller::new(client, store);

        let cancel = CancellationToken::new();
        let interrupt = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::warn!("interrupted, cancelling download");
                    cancel.cancel();
                }
            })
        };

        let tracker = ProgressTracker::new(&self.entry);
        let options = {
            let on_details = tracker.clone();
            let on_progress = tracker.clone();
            InstallOptions::default()
                .cancel(cancel)
                .on_details(Arc::new(move |d: &DownloadDetails| on_details.details(d)))
                .on_progress(Arc::new(move |p: &Progress| on_progress.step(p)))
                .write_queue(WriteQueue::new())
        };

        let result = installer
            .install_content_pack(&self.entry, &config.content_store, &sources, &options)
            .await;
        interrupt.abort();

        match result {
            Ok(record) => {
                tracker.finish("installed");
                println!(
                    "Installed {} into {}",
                    record.path.as_deref().unwrap_or_default(),
                    config.content_store.display()
                );
                Ok(())
            }
            Err(e) => {
                tracker.abandon();
                Err(e.into())
            }
        }
    }
}
