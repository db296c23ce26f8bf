//! Status sink collaborator and banner progress streaming.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;

use fileferry_core::{ItemFailure, OperationKind, ProgressStatus};

use crate::executor::BatchOutcome;
use crate::OPERATION_CHANNEL_SIZE;

/// One event on a banner's progress stream.
///
/// The stream always ends with an explicit [`ProgressEvent::Finished`]
/// before the banner is removed, so consumers never depend on channel
/// teardown timing.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Status of one item within the batch.
    Item {
        index: usize,
        path: PathBuf,
        status: ProgressStatus,
        message: Option<String>,
    },
    /// Explicit completion signal carrying the terminal summary.
    Finished(BatchOutcome),
}

/// Handle to one in-flight banner, owned by exactly one batch.
#[derive(Debug)]
pub struct BannerHandle {
    /// Sink-assigned banner id, used to remove the banner later.
    pub id: u64,
    /// Sender half of the banner's progress stream.
    pub events: mpsc::Sender<ProgressEvent>,
    /// Cancellation token governing the batch.
    pub cancellation: CancellationToken,
    /// Number of items the batch covers.
    pub total_items: usize,
}

/// Create the channel backing a banner.
///
/// Sink implementations call this from `add_banner` and keep the stream;
/// the handle goes back to the batch.
pub fn banner_channel(id: u64, total_items: usize) -> (BannerHandle, ReceiverStream<ProgressEvent>) {
    let (tx, rx) = mpsc::channel(OPERATION_CHANNEL_SIZE);
    let handle = BannerHandle {
        id,
        events: tx,
        cancellation: CancellationToken::new(),
        total_items,
    };
    (handle, ReceiverStream::new(rx))
}

/// Status-center collaborator.
///
/// Each batch owns exactly one banner. On completion the batch sends
/// [`ProgressEvent::Finished`] with the terminal summary and then calls
/// [`StatusSink::remove_banner`]; the sink is expected to replace the
/// in-flight banner with a terminal summary banner at that point.
#[async_trait]
pub trait StatusSink: Send + Sync {
    /// Register a banner for a starting batch.
    async fn add_banner(
        &self,
        kind: OperationKind,
        source: Option<&Path>,
        destination: Option<&Path>,
        total_items: usize,
    ) -> BannerHandle;

    /// Remove an in-flight banner.
    async fn remove_banner(&self, id: u64);
}

/// Sink that discards all progress. Useful for headless callers and
/// tests that do not observe status.
#[derive(Debug, Default)]
pub struct NullStatusSink {
    next_id: AtomicU64,
}

#[async_trait]
impl StatusSink for NullStatusSink {
    async fn add_banner(
        &self,
        _kind: OperationKind,
        _source: Option<&Path>,
        _destination: Option<&Path>,
        total_items: usize,
    ) -> BannerHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (handle, mut stream) = banner_channel(id, total_items);
        tokio::spawn(async move { while stream.next().await.is_some() {} });
        handle
    }

    async fn remove_banner(&self, _id: u64) {}
}

/// Progress bookkeeping for one batch: counts, worst observed status and
/// the banner the events go to.
#[derive(Debug)]
pub(crate) struct BatchProgress {
    handle: BannerHandle,
    kind: OperationKind,
    total: usize,
    succeeded: usize,
    failed: usize,
    skipped: usize,
    worst: ProgressStatus,
    failures: Vec<ItemFailure>,
}

impl BatchProgress {
    pub(crate) fn new(handle: BannerHandle, kind: OperationKind) -> Self {
        let total = handle.total_items;
        Self {
            handle,
            kind,
            total,
            succeeded: 0,
            failed: 0,
            skipped: 0,
            worst: ProgressStatus::Success,
            failures: Vec::new(),
        }
    }

    pub(crate) fn token(&self) -> CancellationToken {
        self.handle.cancellation.clone()
    }

    pub(crate) async fn in_progress(&mut self, index: usize, path: &Path) {
        self.send_item(index, path.to_path_buf(), ProgressStatus::InProgress, None)
            .await;
    }

    pub(crate) async fn success(&mut self, index: usize, path: &Path) {
        self.succeeded += 1;
        self.send_item(index, path.to_path_buf(), ProgressStatus::Success, None)
            .await;
    }

    pub(crate) async fn skip(&mut self, index: usize, path: &Path) {
        self.skipped += 1;
        self.send_item(
            index,
            path.to_path_buf(),
            ProgressStatus::Success,
            Some("skipped".to_string()),
        )
        .await;
    }

    pub(crate) async fn failure(&mut self, index: usize, failure: ItemFailure) {
        self.failed += 1;
        self.worst = self.worst.worst(ProgressStatus::Failed);
        let path = failure.path.clone();
        let message = failure.message.clone();
        self.failures.push(failure);
        self.send_item(index, path, ProgressStatus::Failed, Some(message))
            .await;
    }

    async fn send_item(
        &self,
        index: usize,
        path: PathBuf,
        status: ProgressStatus,
        message: Option<String>,
    ) {
        let _ = self
            .handle
            .events
            .send(ProgressEvent::Item {
                index,
                path,
                status,
                message,
            })
            .await;
    }

    /// Cancel the batch and close out its banner.
    pub(crate) async fn cancel(self, status: &dyn StatusSink) -> BatchOutcome {
        self.handle.cancellation.cancel();
        self.finish(status).await
    }

    /// Send the terminal summary and replace the in-flight banner.
    pub(crate) async fn finish(self, status: &dyn StatusSink) -> BatchOutcome {
        let terminal = if self.handle.cancellation.is_cancelled() {
            // The batch token always overrides per-item outcomes.
            ProgressStatus::Cancelled
        } else {
            self.worst
        };
        let outcome = BatchOutcome {
            kind: self.kind,
            status: terminal,
            total: self.total,
            succeeded: self.succeeded,
            failed: self.failed,
            skipped: self.skipped,
            failures: self.failures,
        };
        let _ = self
            .handle
            .events
            .send(ProgressEvent::Finished(outcome.clone()))
            .await;
        status.remove_banner(self.handle.id).await;
        outcome
    }
}
