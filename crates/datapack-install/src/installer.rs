//! Promotion of verified files into the content store and the metadata
//! write that makes them active.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use datapack_fetch::pack_file_name;
use datapack_fs::PromoteOptions;
use datapack_state::{ContentRecord, MetadataStore};
use datapack_verify::VerifiedFile;

use crate::error::{InstallError, PlaceError, Result};
use crate::events::InstallEvents;
use crate::queue::WriteQueue;

/// A pack copied into the content store whose metadata is not written yet.
#[derive(Debug, Clone)]
pub struct PlacedPack {
    pub entry_id:   String,
    pub file_name:  String,
    pub path:       PathBuf,
    pub sha256:     String,
    pub size:       u64,
    pub date_added: DateTime<Utc>,
    pub existing:   Option<ContentRecord>,
}

pub struct Installer<S: MetadataStore> {
    store:  Arc<S>,
    events: InstallEvents,
}

impl<S: MetadataStore + 'static> Installer<S> {
    pub fn new(store: Arc<S>, events: InstallEvents) -> Self { Self { store, events } }

    pub fn store(&self) -> &Arc<S> { &self.store }

    pub fn events(&self) -> &InstallEvents { &self.events }

    /// Place `verified` and commit its metadata.
    pub async fn install(
        &self,
        verified: VerifiedFile,
        entry_id: &str,
        content_store: &Path,
        existing: Option<ContentRecord>,
        promote: PromoteOptions,
        queue: Option<&WriteQueue>,
    ) -> Result<ContentRecord> {
        let placed = self
            .place(verified, entry_id, content_store, existing, promote)
            .await?;
        self.commit(placed, queue).await
    }

    /// Copy the verified file to its canonical name, then drop the source.
    ///
    /// The name reuses `existing.date_added` when the pack is already known,
    /// so reinstalling a pack always lands on the same file. A new pack gets
    /// the current time, moved forward a millisecond at a time until the name
    /// is free.
    pub async fn place(
        &self,
        verified: VerifiedFile,
        entry_id: &str,
        content_store: &Path,
        existing: Option<ContentRecord>,
        promote: PromoteOptions,
    ) -> std::result::Result<PlacedPack, PlaceError> {
        let known_date = existing.as_ref().map(|r| r.date_added);
        let src = verified.path().to_path_buf();
        let store = content_store.to_path_buf();
        let entry = entry_id.to_string();

        let (date_added, dest) = tokio::task::spawn_blocking(move || {
            let (date_added, dest) = match known_date {
                Some(date) => (date, store.join(pack_file_name(&entry, date))),
                None => reserve_new_name(&store, &entry)?,
            };
            datapack_fs::copy_then_remove(&src, &dest, promote)?;
            Ok::<_, PlaceError>((date_added, dest))
        })
        .await
        .map_err(|e| PlaceError::Task(e.to_string()))??;
        let file_name = pack_file_name(entry_id, date_added);

        Ok(PlacedPack {
            entry_id: entry_id.to_string(),
            file_name,
            path: dest,
            sha256: verified.sha256().to_string(),
            size: verified.size(),
            date_added,
            existing,
        })
    }

    /// Write the metadata for `placed` and notify listeners.
    ///
    /// Routed through `queue` when given. A failure here leaves the placed
    /// file where it is.
    pub async fn commit(&self, placed: PlacedPack, queue: Option<&WriteQueue>) -> Result<ContentRecord> {
        let store = self.store.clone();
        let record = match queue {
            Some(queue) => queue.submit(move || reconcile(store, placed)).await??,
            None => reconcile(store, placed).await?,
        };

        tracing::info!(
            entry = %record.entry_id,
            record = ?record.id,
            path = ?record.path,
            "data pack installed"
        );
        self.events.emit(&record);
        Ok(record)
    }
}

fn reserve_new_name(store: &Path, entry_id: &str) -> datapack_fs::Result<(DateTime<Utc>, PathBuf)> {
    datapack_fs::ensure_dir(store)?;
    let mut date = Utc::now();
    loop {
        let dest = store.join(pack_file_name(entry_id, date));
        if datapack_fs::reserve(&dest)? {
            return Ok((date, dest));
        }
        date += TimeDelta::milliseconds(1);
    }
}

async fn reconcile<S: MetadataStore>(store: Arc<S>, placed: PlacedPack) -> Result<ContentRecord> {
    match placed.existing {
        Some(mut record) => {
            record.path = Some(placed.file_name);
            record.present_on_disk = true;
            record.size = placed.size;
            let record = store.save_content_record(record).await?;

            if let Some(mut entry) = store.find_catalog_entry(&record.entry_id).await?
                && entry.active_data_id == record.id
                && !entry.active_data_on_disk
            {
                entry.active_data_on_disk = true;
                store.save_catalog_entry(entry).await?;
            }
            Ok(record)
        }
        None => {
            let mut record = ContentRecord::new(&placed.entry_id, placed.sha256, placed.date_added).size(placed.size);
            record.path = Some(placed.file_name);
            record.present_on_disk = true;
            let record = store.save_content_record(record).await?;

            let mut entry = store
                .find_catalog_entry(&placed.entry_id)
                .await?
                .ok_or_else(|| InstallError::EntryNotFound(placed.entry_id.clone()))?;
            entry.activate(&record);
            store.save_catalog_entry(entry).await?;
            Ok(record)
        }
    }
}
