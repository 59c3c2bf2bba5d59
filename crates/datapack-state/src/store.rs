use std::collections::BTreeMap;
use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{CatalogEntry, ContentRecord, RecordId, Result};

/// The metadata store the install pipeline reads from and writes to.
///
/// Implementations own id assignment: saving a record whose `id` is `None`
/// creates it and returns it with an id, saving one with an id updates it.
pub trait MetadataStore: Send + Sync {
    fn find_content_record_by_id(
        &self,
        id: RecordId,
    ) -> impl Future<Output = Result<Option<ContentRecord>>> + Send;

    fn find_content_records_by_entry(
        &self,
        entry_id: &str,
    ) -> impl Future<Output = Result<Vec<ContentRecord>>> + Send;

    fn save_content_record(
        &self,
        record: ContentRecord,
    ) -> impl Future<Output = Result<ContentRecord>> + Send;

    fn find_catalog_entry(&self, id: &str) -> impl Future<Output = Result<Option<CatalogEntry>>> + Send;

    fn save_catalog_entry(&self, entry: CatalogEntry) -> impl Future<Output = Result<()>> + Send;
}

/// Table contents shared by the bundled stores.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Tables {
    next_id: RecordId,
    entries: BTreeMap<String, CatalogEntry>,
    records: BTreeMap<RecordId, ContentRecord>,
}

impl Tables {
    pub(crate) fn record(&self, id: RecordId) -> Option<ContentRecord> { self.records.get(&id).cloned() }

    pub(crate) fn records_by_entry(&self, entry_id: &str) -> Vec<ContentRecord> {
        self.records
            .values()
            .filter(|r| r.entry_id == entry_id)
            .cloned()
            .collect()
    }

    pub(crate) fn save_record(&mut self, mut record: ContentRecord) -> ContentRecord {
        let id = match record.id {
            Some(id) => id,
            None => self.next_id.max(1),
        };
        self.next_id = self.next_id.max(id + 1);
        record.id = Some(id);
        self.records.insert(id, record.clone());
        record
    }

    pub(crate) fn entry(&self, id: &str) -> Option<CatalogEntry> { self.entries.get(id).cloned() }

    pub(crate) fn save_entry(&mut self, entry: CatalogEntry) { self.entries.insert(entry.id.clone(), entry); }
}
