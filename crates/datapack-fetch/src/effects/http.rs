use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::Stream;
use url::Url;

/// A boxed stream type for HTTP response bodies.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// A successful response: declared length plus the body as a chunk stream.
pub struct HttpBody<E> {
    pub content_length: Option<u64>,
    pub stream:         BoxStream<'static, Result<Bytes, E>>,
}

/// Asynchronous HTTP client abstraction.
///
/// Implementations handle redirects, proxies, and headers themselves and must
/// report non-2xx responses as errors. Dropping the returned stream must
/// abort the underlying request.
///
/// # Implementations
///
/// - [`ReqwestClient`]: production implementation using `reqwest`
/// - [`MockHttpClient`](crate::mock::MockHttpClient): scripted responses for tests
pub trait HttpClient: Send + Sync {
    /// Error type for HTTP operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue a GET request and return the streaming body.
    fn get(&self, url: &Url) -> impl Future<Output = Result<HttpBody<Self::Error>, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use futures_util::StreamExt;

    use super::*;

    /// Production HTTP client implementation using reqwest.
    #[derive(Clone, Debug, Default)]
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        pub fn new() -> Result<Self, reqwest::Error> {
            let client = reqwest::Client::builder()
                .user_agent(concat!("datapack/", env!("CARGO_PKG_VERSION")))
                .build()?;
            Ok(Self { client })
        }

        /// Wrap a client whose transport the caller already configured.
        pub fn with_client(client: reqwest::Client) -> Self { Self { client } }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn get(&self, url: &Url) -> Result<HttpBody<Self::Error>, Self::Error> {
            let response = self.client.get(url.clone()).send().await?.error_for_status()?;
            let content_length = response.content_length();
            let stream = response.bytes_stream().map(|chunk| chunk.map(Bytes::from));
            Ok(HttpBody {
                content_length,
                stream: Box::pin(stream),
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
