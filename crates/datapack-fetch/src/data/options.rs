use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::progress::{DownloadDetails, Progress};

/// Phases of a single download attempt.
///
/// Connecting → Downloading → Verifying. Promotion into the content store
/// belongs to the installer, not to the fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    /// Waiting for response headers.
    #[default]
    Connecting,

    /// Streaming body chunks into the temp file.
    Downloading,

    /// Body complete, digest being compared.
    Verifying,
}

impl fmt::Display for FetchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchPhase::Connecting => write!(f, "Connecting"),
            FetchPhase::Downloading => write!(f, "Downloading"),
            FetchPhase::Verifying => write!(f, "Verifying"),
        }
    }
}

pub type ProgressCallback = Arc<dyn Fn(&Progress) + Send + Sync>;
pub type DetailsCallback = Arc<dyn Fn(&DownloadDetails) + Send + Sync>;

/// Per-attempt options for [`Fetcher::fetch_verified`](crate::Fetcher::fetch_verified).
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use datapack_fetch::{CancellationToken, FetchOptions, Progress};
///
/// let cancel = CancellationToken::new();
/// let options = FetchOptions::default()
///     .cancel(cancel.clone())
///     .on_progress(Arc::new(|progress: &Progress| {
///         if let Some(pct) = progress.percentage() {
///             println!("{pct:.1}%");
///         }
///     }));
/// ```
#[derive(Clone, Default)]
pub struct FetchOptions {
    /// Aborts the in-flight request when fired.
    pub cancel: CancellationToken,

    /// Invoked on every chunk. Callers throttle their own rendering.
    pub on_progress: Option<ProgressCallback>,

    /// Invoked once, after response headers arrive.
    pub on_details: Option<DetailsCallback>,
}

impl fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("cancelled", &self.cancel.is_cancelled())
            .field("on_progress", &self.on_progress.as_ref().map(|_| "{ ... }"))
            .field("on_details", &self.on_details.as_ref().map(|_| "{ ... }"))
            .finish()
    }
}

impl FetchOptions {
    #[must_use]
    pub fn cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub fn on_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.on_progress = Some(on_progress);
        self
    }

    #[must_use]
    pub fn on_details(mut self, on_details: DetailsCallback) -> Self {
        self.on_details = Some(on_details);
        self
    }

    pub(crate) fn report_progress(&self, progress: Progress) {
        if let Some(ref callback) = self.on_progress {
            callback(&progress);
        }
    }

    pub(crate) fn report_details(&self, details: DownloadDetails) {
        if let Some(ref callback) = self.on_details {
            callback(&details);
        }
    }
}
