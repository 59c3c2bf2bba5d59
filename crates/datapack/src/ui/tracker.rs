use datapack_fetch::{DownloadDetails, FetchPhase, Progress};
use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;

const PB_STYLE: &str = "{spinner:.blue} {prefix:>12.cyan.bold} [{elapsed_precise}] {wide_bar:.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta}) {msg}";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

static PB_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    ProgressStyle::with_template(PB_STYLE)
        .ok()
        .map(|style| style.tick_chars(TICK).progress_chars(PB_CHARS))
});

/// Download progress bar fed by fetch callbacks.
///
/// Clones draw to the same bar, so one can be moved into each callback.
#[derive(Clone)]
pub struct ProgressTracker {
    pb: ProgressBar,
}

impl ProgressTracker {
    pub fn new(prefix: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        let pb = match PB_TEMPLATE.as_ref() {
            Some(style) => pb.with_style(style.clone()),
            None => pb,
        };
        pb.set_prefix(prefix.to_string());
        Self { pb }
    }

    /// A new attempt started; the bar restarts at zero.
    pub fn details(&self, details: &DownloadDetails) {
        self.pb.reset();
        if let Some(total) = details.total_bytes {
            self.pb.set_length(total);
        }
        self.pb.set_message(details.url.clone());
    }

    pub fn step(&self, progress: &Progress) {
        if progress.phase == FetchPhase::Verifying {
            self.pb.set_message("verifying");
        }
        self.pb.set_position(progress.bytes_downloaded);
    }

    pub fn finish(&self, message: impl Into<String>) { self.pb.finish_with_message(message.into()); }

    pub fn abandon(&self) { self.pb.abandon(); }
}
