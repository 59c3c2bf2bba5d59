use std::sync::{Arc, Mutex};

use bytes::Bytes;
use datapack_fetch::mock::{MockHttpClient, MockRoute};
use datapack_fetch::{
    CancellationToken, DownloadDetails, DownloadSource, FetchError, FetchOptions, Fetcher, FetchPhase, Progress,
};
use tempfile::tempdir;

const ABC_SHA256: &str = "BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD";

fn url(s: &str) -> url::Url { url::Url::parse(s).unwrap() }

#[tokio::test]
async fn test_fetch_verified_matches_reference_digest() {
    let client = MockHttpClient::new().route("http://mirror1/x/a.zip", MockRoute::chunked(b"abc", 1));
    let fetcher = Fetcher::new(client);
    let dir = tempdir().unwrap();
    let temp = dir.path().join("a.zip.temp");

    let verified = fetcher
        .fetch_verified(
            &url("http://mirror1/x/a.zip"),
            &temp,
            &ABC_SHA256.to_lowercase(),
            &FetchOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(verified.sha256(), ABC_SHA256);
    assert_eq!(verified.size(), 3);
    assert_eq!(std::fs::read(&temp).unwrap(), b"abc");
}

#[tokio::test]
async fn test_progress_is_monotonic_and_details_fire_once() {
    let data: Vec<u8> = (0..4096u32).map(|i| (i % 256) as u8).collect();
    let expected = datapack_verify::to_hex_upper(&datapack_verify::Sha256Hasher::digest(&data));
    let client = MockHttpClient::new().route("http://m/p.zip", MockRoute::chunked(&data, 500));
    let fetcher = Fetcher::new(client);
    let dir = tempdir().unwrap();

    let percentages = Arc::new(Mutex::new(Vec::new()));
    let details = Arc::new(Mutex::new(Vec::<DownloadDetails>::new()));
    let options = {
        let percentages = percentages.clone();
        let details = details.clone();
        FetchOptions::default()
            .on_progress(Arc::new(move |p: &Progress| {
                if p.phase == FetchPhase::Downloading {
                    percentages.lock().unwrap().push(p.percentage().unwrap());
                }
            }))
            .on_details(Arc::new(move |d: &DownloadDetails| details.lock().unwrap().push(d.clone())))
    };

    fetcher
        .fetch_verified(&url("http://m/p.zip"), &dir.path().join("p.temp"), &expected, &options)
        .await
        .unwrap();

    let percentages = percentages.lock().unwrap();
    assert_eq!(percentages.len(), 9);
    assert!(percentages.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*percentages.last().unwrap(), 100.0);

    let details = details.lock().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].total_bytes, Some(4096));
}

#[tokio::test]
async fn test_integrity_failure_removes_temp_file() {
    let client = MockHttpClient::new().route("http://m/p.zip", MockRoute::body(Bytes::from_static(b"tampered")));
    let fetcher = Fetcher::new(client);
    let dir = tempdir().unwrap();
    let temp = dir.path().join("p.zip.temp");

    let err = fetcher
        .fetch_verified(&url("http://m/p.zip"), &temp, ABC_SHA256, &FetchOptions::default())
        .await
        .unwrap_err();

    assert!(err.is_integrity());
    let message = err.to_string();
    assert!(message.contains("integrity check failed"));
    assert!(message.contains("corrupted"));
    assert!(!temp.exists());
}

#[tokio::test]
async fn test_http_error_is_network_failure() {
    let client = MockHttpClient::new().route("http://m/p.zip", MockRoute::Status(503));
    let fetcher = Fetcher::new(client);
    let dir = tempdir().unwrap();

    let err = fetcher
        .fetch_verified(&url("http://m/p.zip"), &dir.path().join("p.temp"), ABC_SHA256, &FetchOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Network(ref m) if m.contains("503")));
}

#[tokio::test]
async fn test_broken_stream_removes_partial_file() {
    let client = MockHttpClient::new().route(
        "http://m/p.zip",
        MockRoute::BrokenBody {
            chunks: vec![Bytes::from_static(b"partial")],
            error:  "connection reset".into(),
        },
    );
    let fetcher = Fetcher::new(client);
    let dir = tempdir().unwrap();
    let temp = dir.path().join("p.temp");

    let err = fetcher
        .fetch_verified(&url("http://m/p.zip"), &temp, ABC_SHA256, &FetchOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Network(ref m) if m.contains("connection reset")));
    assert!(!temp.exists());
}

#[tokio::test]
async fn test_cancellation_aborts_mid_stream() {
    let client = MockHttpClient::new().route(
        "http://m/p.zip",
        MockRoute::Stall {
            chunks: vec![Bytes::from_static(b"first chunk")],
        },
    );
    let fetcher = Fetcher::new(client);
    let dir = tempdir().unwrap();
    let temp = dir.path().join("p.temp");

    let cancel = CancellationToken::new();
    let options = {
        let cancel = cancel.clone();
        FetchOptions::default().cancel(cancel.clone()).on_progress(Arc::new(move |p: &Progress| {
            if p.bytes_downloaded > 0 {
                cancel.cancel();
            }
        }))
    };

    let err = fetcher
        .fetch_verified(&url("http://m/p.zip"), &temp, ABC_SHA256, &options)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert!(!temp.exists());
}

#[tokio::test]
async fn test_cancelled_before_connect() {
    let client = MockHttpClient::new().route("http://m/p.zip", MockRoute::body(Bytes::from_static(b"abc")));
    let fetcher = Fetcher::new(client.clone());
    let dir = tempdir().unwrap();

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = fetcher
        .fetch_verified(
            &url("http://m/p.zip"),
            &dir.path().join("p.temp"),
            ABC_SHA256,
            &FetchOptions::default().cancel(cancel),
        )
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn test_resolved_source_url_is_requested() {
    let source = DownloadSource::new("primary", "http://mirror1/x");
    let target = source.resolve("entry-1.zip").unwrap();
    let client = MockHttpClient::new().route(target.as_str(), MockRoute::body(Bytes::from_static(b"abc")));
    let fetcher = Fetcher::new(client.clone());
    let dir = tempdir().unwrap();

    fetcher
        .fetch_verified(&target, &dir.path().join("e.temp"), ABC_SHA256, &FetchOptions::default())
        .await
        .unwrap();

    assert_eq!(client.requests(), vec!["http://mirror1/x/entry-1.zip".to_string()]);
}
