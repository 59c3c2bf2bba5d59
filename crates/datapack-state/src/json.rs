use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use datapack_fs::{AtomicWriteOptions, atomic_read, atomic_write};

use crate::store::Tables;
use crate::{CatalogEntry, ContentRecord, MetadataStore, RecordId, Result, StateError};

/// Metadata store persisted as a single JSON document.
///
/// Every mutation rewrites the document with [`atomic_write`], so a crash
/// leaves either the previous or the new state on disk.
#[derive(Debug)]
pub struct JsonStore {
    path:   PathBuf,
    tables: Mutex<Tables>,
}

impl JsonStore {
    /// Open the document at `path`, starting empty if it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let tables = match atomic_read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StateError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(datapack_fs::Error::Read { source, .. }) if source.kind() == ErrorKind::NotFound => Tables::default(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), "opened metadata store");
        Ok(Self {
            path,
            tables: Mutex::new(tables),
        })
    }

    pub fn path(&self) -> &Path { &self.path }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>> { self.tables.lock().map_err(|_| StateError::Poisoned) }

    fn persist(&self, tables: &Tables) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(tables).map_err(StateError::Encode)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            datapack_fs::ensure_dir(parent)?;
        }
        atomic_write(&self.path, &bytes, AtomicWriteOptions::new())?;
        Ok(())
    }
}

impl MetadataStore for JsonStore {
    async fn find_content_record_by_id(&self, id: RecordId) -> Result<Option<ContentRecord>> {
        Ok(self.tables()?.record(id))
    }

    async fn find_content_records_by_entry(&self, entry_id: &str) -> Result<Vec<ContentRecord>> {
        Ok(self.tables()?.records_by_entry(entry_id))
    }

    async fn save_content_record(&self, record: ContentRecord) -> Result<ContentRecord> {
        let mut tables = self.tables()?;
        let mut staged = tables.clone();
        let saved = staged.save_record(record);
        self.persist(&staged)?;
        *tables = staged;
        Ok(saved)
    }

    async fn find_catalog_entry(&self, id: &str) -> Result<Option<CatalogEntry>> { Ok(self.tables()?.entry(id)) }

    async fn save_catalog_entry(&self, entry: CatalogEntry) -> Result<()> {
        let mut tables = self.tables()?;
        let mut staged = tables.clone();
        staged.save_entry(entry);
        self.persist(&staged)?;
        *tables = staged;
        Ok(())
    }
}
