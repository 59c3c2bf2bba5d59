//! Single-writer FIFO queue for metadata mutations.
//!
//! Units of work run one at a time, in the order they were enqueued. Every
//! writer that touches the same catalog rows must share one queue; clones of
//! a [`WriteQueue`] share the same worker.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::sync::{mpsc, oneshot};

type Job = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("write queue worker has stopped")]
    Closed,

    #[error("queued write panicked")]
    JobFailed,
}

#[derive(Clone, Debug)]
pub struct WriteQueue {
    tx: mpsc::UnboundedSender<Job>,
}

impl WriteQueue {
    /// Start a queue whose worker runs on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn new() -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();
        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                job().await;
            }
            tracing::debug!("write queue drained, worker exiting");
        });
        Self { tx }
    }

    /// Append `job` to the queue.
    ///
    /// The position is fixed when this returns, before the handle is awaited,
    /// so the order of `enqueue` calls is the order of execution.
    pub fn enqueue<F, Fut, T>(&self, job: F) -> JobHandle<T>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (done_tx, done_rx) = oneshot::channel();
        let job: Job = Box::new(move || {
            async move {
                let outcome = AssertUnwindSafe(async move { job().await }).catch_unwind().await;
                if outcome.is_err() {
                    tracing::error!("queued write panicked");
                }
                let _ = done_tx.send(outcome.map_err(drop));
            }
            .boxed()
        });
        if self.tx.send(job).is_err() {
            tracing::warn!("write queue worker has stopped, dropping job");
        }
        JobHandle { rx: done_rx }
    }

    /// Enqueue `job` and wait for its output.
    pub async fn submit<F, Fut, T>(&self, job: F) -> Result<T, QueueError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        self.enqueue(job).await
    }

    pub fn is_closed(&self) -> bool { self.tx.is_closed() }
}

impl Default for WriteQueue {
    fn default() -> Self { Self::new() }
}

/// Completion of an enqueued job.
pub struct JobHandle<T> {
    rx: oneshot::Receiver<Result<T, ()>>,
}

impl<T> Future for JobHandle<T> {
    type Output = Result<T, QueueError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|received| match received {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(())) => Err(QueueError::JobFailed),
            Err(_) => Err(QueueError::Closed),
        })
    }
}
