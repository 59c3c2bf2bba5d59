//! I/O side of fetching: the HTTP seam and the verifying fetcher.

mod fetcher;
mod http;

pub use fetcher::Fetcher;
pub use http::{BoxStream, HttpBody, HttpClient};

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
