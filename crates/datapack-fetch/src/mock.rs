//! Scripted [`HttpClient`] for tests.
//!
//! Each URL is mapped to a [`MockRoute`]; unknown URLs answer 404. Every
//! request is logged so tests can assert which mirrors were contacted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use futures_util::{StreamExt, stream};
use url::Url;

use crate::effects::{HttpBody, HttpClient};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct MockError(pub String);

#[derive(Debug, Clone)]
pub enum MockRoute {
    /// Serve these chunks, declaring `content_length`.
    Body {
        chunks:         Vec<Bytes>,
        content_length: Option<u64>,
    },
    /// Fail before any body with this HTTP status.
    Status(u16),
    /// Fail mid-stream after sending `chunks`.
    BrokenBody { chunks: Vec<Bytes>, error: String },
    /// Send `chunks`, then never finish.
    Stall { chunks: Vec<Bytes> },
}

impl MockRoute {
    /// Serve `data` in one chunk with a correct `Content-Length`.
    pub fn body(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        Self::Body {
            content_length: Some(data.len() as u64),
            chunks:         vec![data],
        }
    }

    /// Serve `data` split into `chunk_size` pieces with a correct length.
    pub fn chunked(data: &[u8], chunk_size: usize) -> Self {
        Self::Body {
            content_length: Some(data.len() as u64),
            chunks:         data.chunks(chunk_size.max(1)).map(Bytes::copy_from_slice).collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    routes:   Arc<HashMap<String, MockRoute>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockHttpClient {
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn route(mut self, url: impl Into<String>, route: MockRoute) -> Self {
        Arc::make_mut(&mut self.routes).insert(url.into(), route);
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

impl HttpClient for MockHttpClient {
    type Error = MockError;

    async fn get(&self, url: &Url) -> Result<HttpBody<Self::Error>, Self::Error> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(url.to_string());
        }

        match self.routes.get(url.as_str()).cloned() {
            None => Err(MockError(format!("HTTP status 404 Not Found for {url}"))),
            Some(MockRoute::Status(code)) => Err(MockError(format!("HTTP status {code} for {url}"))),
            Some(MockRoute::Body {
                chunks,
                content_length,
            }) => Ok(HttpBody {
                content_length,
                stream: Box::pin(stream::iter(chunks.into_iter().map(Ok::<Bytes, MockError>))),
            }),
            Some(MockRoute::BrokenBody { chunks, error }) => {
                let tail = stream::once(async move { Err(MockError(error)) });
                Ok(HttpBody {
                    content_length: None,
                    stream:         Box::pin(stream::iter(chunks.into_iter().map(Ok::<Bytes, MockError>)).chain(tail)),
                })
            }
            Some(MockRoute::Stall { chunks }) => Ok(HttpBody {
                content_length: None,
                stream:         Box::pin(stream::iter(chunks.into_iter().map(Ok::<Bytes, MockError>)).chain(stream::pending())),
            }),
        }
    }
}
