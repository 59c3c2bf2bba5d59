use std::fmt;

use anyhow::{Context, Result};
use clap::Args;
use datapack_state::{CatalogEntry, ContentRecord, MetadataStore};

use crate::config::DatapackConfig;

#[derive(Args, Clone, Debug)]
pub struct ShowArg {
    pub entry: String,

    /// Print the entry and its records as JSON.
    #[arg(long)]
    pub json: bool,
}

impl ShowArg {
    pub async fn run(self, config: &DatapackConfig) -> Result<()> {
        let store = config.open_store().context("failed to open metadata store")?;
        let entry = store
            .find_catalog_entry(&self.entry)
            .await?
            .with_context(|| format!("catalog entry {:?} not found", self.entry))?;
        let records = store.find_content_records_by_entry(&self.entry).await?;

        if self.json {
            let doc = serde_json::json!({ "entry": entry, "records": records });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        } else {
            print!("{}", EntryView { entry: &entry, records: &records });
        }
        Ok(())
    }
}

struct EntryView<'a> {
    entry:   &'a CatalogEntry,
    records: &'a [ContentRecord],
}

impl fmt::Display for EntryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.entry.title, self.entry.id)?;
        if self.records.is_empty() {
            return writeln!(f, "  no data packs");
        }
        for record in self.records {
            let active = if record.id.is_some() && record.id == self.entry.active_data_id { "*" } else { " " };
            let status = if record.present_on_disk { "✓" } else { "✗" };
            writeln!(
                f,
                "{active} {status} #{id} {title} {date} {sha} {path}",
                id = record.id.unwrap_or_default(),
                title = record.title,
                date = record.date_added.format("%Y-%m-%d %H:%M:%S"),
                sha = record.sha256,
                path = record.path.as_deref().unwrap_or("-"),
            )?;
        }
        Ok(())
    }
}
