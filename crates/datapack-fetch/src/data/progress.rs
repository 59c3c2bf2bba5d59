use super::options::FetchPhase;

/// Snapshot of a download attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub phase:            FetchPhase,
    pub bytes_downloaded: u64,
    /// Declared `Content-Length`, when the server sent one.
    pub total_bytes:      Option<u64>,
}

impl Progress {
    /// Percentage of the declared length received so far, capped at 100.
    ///
    /// `None` when the length is unknown. Never decreases over an attempt
    /// because `bytes_downloaded` only grows.
    ///
    /// ```
    /// use datapack_fetch::{FetchPhase, Progress};
    ///
    /// let p = Progress { phase: FetchPhase::Downloading, bytes_downloaded: 25, total_bytes: Some(100) };
    /// assert_eq!(p.percentage(), Some(25.0));
    /// ```
    pub fn percentage(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) => Some(100.0),
            Some(total) => Some((self.bytes_downloaded as f64 / total as f64 * 100.0).min(100.0)),
            None => None,
        }
    }
}

/// What is known about a download once the response headers arrive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadDetails {
    pub url:         String,
    pub total_bytes: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_unknown_length() {
        let p = Progress {
            phase:            FetchPhase::Downloading,
            bytes_downloaded: 10,
            total_bytes:      None,
        };
        assert_eq!(p.percentage(), None);
    }

    #[test]
    fn test_percentage_capped() {
        let p = Progress {
            phase:            FetchPhase::Downloading,
            bytes_downloaded: 150,
            total_bytes:      Some(100),
        };
        assert_eq!(p.percentage(), Some(100.0));
    }
}
