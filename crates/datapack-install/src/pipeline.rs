//! Mirror fallback driver.
//!
//! Mirrors are tried strictly in the order given. A failed attempt is logged,
//! its temp file removed, and the next mirror tried; only when every mirror
//! has failed does the caller see an error. The first verified download is
//! installed and no further mirrors are contacted.

use std::path::Path;
use std::sync::Arc;

use datapack_fetch::data::options::{DetailsCallback, ProgressCallback};
use datapack_fetch::{
    CancellationToken, DownloadSource, FetchOptions, Fetcher, HttpClient, pack_file_name, temp_path_for,
};
use datapack_fs::PromoteOptions;
use datapack_state::{ContentRecord, MetadataStore, RecordId};
use datapack_verify::{VerificationError, VerifiedFile, digests_match};

use crate::error::{AttemptError, InstallError, Result, SourceFailure};
use crate::events::InstallEvents;
use crate::installer::{Installer, PlacedPack};
use crate::queue::WriteQueue;

/// Options for a download-and-install run.
#[derive(Clone, Debug, Default)]
pub struct InstallOptions {
    pub fetch:       FetchOptions,
    /// Queue shared by every metadata writer. Without one the metadata write
    /// runs inline, which is only safe when installs never overlap.
    pub write_queue: Option<WriteQueue>,
}

impl InstallOptions {
    #[must_use]
    pub fn cancel(mut self, cancel: CancellationToken) -> Self {
        self.fetch = self.fetch.cancel(cancel);
        self
    }

    #[must_use]
    pub fn on_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.fetch = self.fetch.on_progress(on_progress);
        self
    }

    #[must_use]
    pub fn on_details(mut self, on_details: DetailsCallback) -> Self {
        self.fetch = self.fetch.on_details(on_details);
        self
    }

    #[must_use]
    pub fn write_queue(mut self, queue: WriteQueue) -> Self {
        self.write_queue = Some(queue);
        self
    }
}

/// Options for installing a file that is already on the local disk.
#[derive(Clone, Debug, Default)]
pub struct ImportOptions {
    pub write_queue: Option<WriteQueue>,
    pub keep_source: bool,
}

impl ImportOptions {
    #[must_use]
    pub fn write_queue(mut self, queue: WriteQueue) -> Self {
        self.write_queue = Some(queue);
        self
    }

    /// Copy the file into the store without removing the original.
    #[must_use]
    pub fn keep_source(mut self, keep_source: bool) -> Self {
        self.keep_source = keep_source;
        self
    }
}

/// Downloads, verifies, and installs data packs.
pub struct PackInstaller<C: HttpClient, S: MetadataStore> {
    fetcher:   Fetcher<C>,
    installer: Installer<S>,
}

impl<C: HttpClient, S: MetadataStore + 'static> PackInstaller<C, S> {
    pub fn new(client: C, store: Arc<S>) -> Self {
        Self {
            fetcher:   Fetcher::new(client),
            installer: Installer::new(store, InstallEvents::new()),
        }
    }

    /// Share an existing listener set instead of a private one.
    #[must_use]
    pub fn with_events(self, events: InstallEvents) -> Self {
        let store = self.installer.store().clone();
        Self {
            fetcher:   self.fetcher,
            installer: Installer::new(store, events),
        }
    }

    pub fn events(&self) -> &InstallEvents { self.installer.events() }

    pub fn store(&self) -> &Arc<S> { self.installer.store() }

    /// Install the active data pack of catalog entry `entry_id`.
    pub async fn install_content_pack(
        &self,
        entry_id: &str,
        content_store: &Path,
        sources: &[DownloadSource],
        options: &InstallOptions,
    ) -> Result<ContentRecord> {
        if sources.is_empty() {
            return Err(InstallError::NoSources);
        }
        let store = self.installer.store();
        let entry = store
            .find_catalog_entry(entry_id)
            .await?
            .ok_or_else(|| InstallError::EntryNotFound(entry_id.to_string()))?;
        let record_id = entry
            .active_data_id
            .ok_or_else(|| InstallError::NoActiveData(entry_id.to_string()))?;
        let record = store
            .find_content_record_by_id(record_id)
            .await?
            .ok_or(InstallError::RecordNotFound(record_id))?;

        self.install_from_sources(record, content_store, sources, options).await
    }

    /// Install the data pack described by content record `record_id`.
    pub async fn install_record(
        &self,
        record_id: RecordId,
        content_store: &Path,
        sources: &[DownloadSource],
        options: &InstallOptions,
    ) -> Result<ContentRecord> {
        if sources.is_empty() {
            return Err(InstallError::NoSources);
        }
        let record = self
            .installer
            .store()
            .find_content_record_by_id(record_id)
            .await?
            .ok_or(InstallError::RecordNotFound(record_id))?;

        self.install_from_sources(record, content_store, sources, options).await
    }

    /// Install a pack that is already on disk, such as a sideloaded file.
    ///
    /// The catalog entry must exist before anything is touched. The file is
    /// hashed and must match `sha256`. It is matched to a known record by
    /// digest unless `existing` names one; an unknown digest creates a new
    /// record and makes it the entry's active data.
    pub async fn import_already_downloaded_pack(
        &self,
        entry_id: &str,
        file: &Path,
        content_store: &Path,
        sha256: &str,
        existing: Option<ContentRecord>,
        options: &ImportOptions,
    ) -> Result<ContentRecord> {
        if self.installer.store().find_catalog_entry(entry_id).await?.is_none() {
            return Err(InstallError::EntryNotFound(entry_id.to_string()));
        }

        let path = file.to_path_buf();
        let expected = sha256.to_string();
        let verified = tokio::task::spawn_blocking(move || VerifiedFile::hash(path, &expected))
            .await
            .map_err(|e| InstallError::Task(e.to_string()))?
            .map_err(|e| match e {
                VerificationError::Mismatch { expected, actual } => InstallError::Integrity { expected, actual },
                VerificationError::Io(source) => InstallError::Read {
                    path: file.to_path_buf(),
                    source,
                },
            })?;

        let existing = match existing {
            Some(record) if !digests_match(&record.sha256, verified.sha256()) => {
                return Err(InstallError::Integrity {
                    expected: record.sha256,
                    actual:   verified.sha256().to_string(),
                });
            }
            Some(record) => Some(record),
            None => self
                .installer
                .store()
                .find_content_records_by_entry(entry_id)
                .await?
                .into_iter()
                .find(|r| digests_match(&r.sha256, verified.sha256())),
        };

        self.installer
            .install(
                verified,
                entry_id,
                content_store,
                existing,
                PromoteOptions::new().keep_source(options.keep_source),
                options.write_queue.as_ref(),
            )
            .await
    }

    async fn install_from_sources(
        &self,
        record: ContentRecord,
        content_store: &Path,
        sources: &[DownloadSource],
        options: &InstallOptions,
    ) -> Result<ContentRecord> {
        datapack_fs::ensure_dir(content_store)?;

        let file_name = pack_file_name(&record.entry_id, record.date_added);
        let temp_path = temp_path_for(&content_store.join(&file_name));
        let mut failures = Vec::new();

        for source in sources {
            match self
                .attempt(source, &file_name, &temp_path, content_store, &record, options)
                .await
            {
                Ok(placed) => return self.installer.commit(placed, options.write_queue.as_ref()).await,
                Err(error) => {
                    tracing::warn!(
                        source = %source.name,
                        url = %source.base_url,
                        error = %error,
                        "data pack source failed, trying next"
                    );
                    if let Err(cleanup) = datapack_fs::remove_if_exists(&temp_path) {
                        tracing::warn!(path = %temp_path.display(), error = %cleanup, "failed to remove temp file");
                    }
                    failures.push(SourceFailure {
                        source: source.clone(),
                        error,
                    });
                }
            }
        }

        Err(InstallError::Exhausted(failures))
    }

    async fn attempt(
        &self,
        source: &DownloadSource,
        file_name: &str,
        temp_path: &Path,
        content_store: &Path,
        record: &ContentRecord,
        options: &InstallOptions,
    ) -> std::result::Result<PlacedPack, AttemptError> {
        let url = source.resolve(file_name)?;
        tracing::debug!(source = %source.name, url = %url, "downloading data pack");

        let verified = self
            .fetcher
            .fetch_verified(&url, temp_path, &record.sha256, &options.fetch)
            .await?;

        let placed = self
            .installer
            .place(
                verified,
                &record.entry_id,
                content_store,
                Some(record.clone()),
                PromoteOptions::new(),
            )
            .await?;
        Ok(placed)
    }
}

