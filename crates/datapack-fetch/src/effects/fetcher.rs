use std::path::Path;

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use url::Url;

use datapack_verify::{Hasher, Sha256Hasher, VerificationError, VerifiedFile};

use crate::data::{DownloadDetails, FetchOptions, FetchPhase, Progress};
use crate::effects::http::HttpClient;
use crate::error::{FetchError, Result};

/// Streams a URL to disk while hashing it.
pub struct Fetcher<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C) -> Self { Self { client } }

    pub fn client(&self) -> &C { &self.client }

    /// Download `url` into `temp_path` and check it against `expected_sha256`.
    ///
    /// The body goes chunk by chunk into both the hasher and the file; it is
    /// never held in memory whole. On any failure, including a digest mismatch
    /// or cancellation, `temp_path` is removed before the error is returned.
    pub async fn fetch_verified(
        &self,
        url: &Url,
        temp_path: &Path,
        expected_sha256: &str,
        options: &FetchOptions,
    ) -> Result<VerifiedFile> {
        let result = self.stream_to_temp(url, temp_path, expected_sha256, options).await;
        if let Err(ref e) = result {
            tracing::debug!(url = %url, error = %e, "download attempt failed, discarding temp file");
            if let Err(cleanup) = datapack_fs::remove_if_exists(temp_path) {
                tracing::warn!(path = %temp_path.display(), error = %cleanup, "failed to remove temp file");
            }
        }
        result
    }

    async fn stream_to_temp(
        &self,
        url: &Url,
        temp_path: &Path,
        expected_sha256: &str,
        options: &FetchOptions,
    ) -> Result<VerifiedFile> {
        options.report_progress(Progress::default());

        let body = tokio::select! {
            biased;
            _ = options.cancel.cancelled() => return Err(FetchError::Cancelled),
            body = self.client.get(url) => body.map_err(|e| FetchError::Network(e.to_string()))?,
        };
        let total_bytes = body.content_length;
        options.report_details(DownloadDetails {
            url: url.to_string(),
            total_bytes,
        });

        let mut file = tokio::fs::File::create(temp_path)
            .await
            .map_err(FetchError::io(temp_path))?;
        let mut hasher = Sha256Hasher::new();
        let mut stream = body.stream;
        let mut bytes_downloaded = 0u64;

        loop {
            let next = tokio::select! {
                biased;
                _ = options.cancel.cancelled() => return Err(FetchError::Cancelled),
                next = stream.next() => next,
            };
            let Some(chunk) = next else { break };
            let chunk = chunk.map_err(|e| FetchError::Network(e.to_string()))?;

            hasher.update(&chunk);
            file.write_all(&chunk).await.map_err(FetchError::io(temp_path))?;
            bytes_downloaded += chunk.len() as u64;

            options.report_progress(Progress {
                phase: FetchPhase::Downloading,
                bytes_downloaded,
                total_bytes,
            });
        }

        file.flush().await.map_err(FetchError::io(temp_path))?;
        file.sync_all().await.map_err(FetchError::io(temp_path))?;
        drop(file);

        options.report_progress(Progress {
            phase: FetchPhase::Verifying,
            bytes_downloaded,
            total_bytes,
        });

        let actual = hasher.finalize_hex();
        VerifiedFile::check(temp_path, bytes_downloaded, expected_sha256, actual).map_err(|e| match e {
            VerificationError::Mismatch { expected, actual } => FetchError::Integrity { expected, actual },
            VerificationError::Io(source) => FetchError::Io {
                path: temp_path.to_path_buf(),
                source,
            },
        })
    }
}
