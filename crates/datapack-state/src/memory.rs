use std::sync::{Mutex, MutexGuard};

use crate::store::Tables;
use crate::{CatalogEntry, ContentRecord, MetadataStore, RecordId, Result, StateError};

/// In-process metadata store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>> { self.tables.lock().map_err(|_| StateError::Poisoned) }
}

impl MetadataStore for MemoryStore {
    async fn find_content_record_by_id(&self, id: RecordId) -> Result<Option<ContentRecord>> {
        Ok(self.tables()?.record(id))
    }

    async fn find_content_records_by_entry(&self, entry_id: &str) -> Result<Vec<ContentRecord>> {
        Ok(self.tables()?.records_by_entry(entry_id))
    }

    async fn save_content_record(&self, record: ContentRecord) -> Result<ContentRecord> {
        Ok(self.tables()?.save_record(record))
    }

    async fn find_catalog_entry(&self, id: &str) -> Result<Option<CatalogEntry>> { Ok(self.tables()?.entry(id)) }

    async fn save_catalog_entry(&self, entry: CatalogEntry) -> Result<()> {
        self.tables()?.save_entry(entry);
        Ok(())
    }
}
