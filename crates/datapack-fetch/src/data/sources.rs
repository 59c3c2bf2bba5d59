use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{FetchError, Result};

/// One mirror offering copies of data packs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadSource {
    /// Human-readable label used in logs and error reports.
    pub name:     String,
    /// Directory URL that pack file names are appended to.
    pub base_url: String,
}

impl DownloadSource {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name:     name.into(),
            base_url: base_url.into(),
        }
    }

    /// The URL of `file_name` on this mirror.
    ///
    /// `file_name` is appended as one percent-encoded path segment, so it can
    /// neither leave the mirror's directory nor change its host.
    ///
    /// ```
    /// use datapack_fetch::DownloadSource;
    ///
    /// let source = DownloadSource::new("primary", "https://mirror.example/packs");
    /// let url = source.resolve("abc-1600000000000.zip").unwrap();
    /// assert_eq!(url.as_str(), "https://mirror.example/packs/abc-1600000000000.zip");
    /// ```
    pub fn resolve(&self, file_name: &str) -> Result<Url> {
        let invalid = |reason: String| FetchError::InvalidUrl {
            url: self.base_url.clone(),
            reason,
        };
        let mut url = Url::parse(self.base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(file_name);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_and_without_trailing_slash() {
        let a = DownloadSource::new("a", "http://mirror1/x");
        let b = DownloadSource::new("b", "http://mirror1/x/");
        assert_eq!(a.resolve("e-1.zip").unwrap().as_str(), "http://mirror1/x/e-1.zip");
        assert_eq!(b.resolve("e-1.zip").unwrap().as_str(), "http://mirror1/x/e-1.zip");
    }

    #[test]
    fn test_resolve_keeps_name_in_one_segment() {
        let source = DownloadSource::new("a", "http://mirror1/packs/");
        let url = source.resolve("../../etc/passwd").unwrap();
        assert_eq!(url.host_str(), Some("mirror1"));
        assert!(url.path().starts_with("/packs/"));
        assert_eq!(url.path_segments().unwrap().count(), 2);
    }

    #[test]
    fn test_resolve_rejects_bad_base() {
        let source = DownloadSource::new("broken", "not a url");
        assert!(matches!(source.resolve("e-1.zip"), Err(FetchError::InvalidUrl { .. })));

        let opaque = DownloadSource::new("opaque", "mailto:someone@example.com");
        assert!(matches!(opaque.resolve("e-1.zip"), Err(FetchError::InvalidUrl { .. })));
    }
}
