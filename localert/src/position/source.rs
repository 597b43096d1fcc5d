//! Location source trait and watch handle.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::config::WatchConfig;
use super::error::PositionError;
use super::sample::PositionSample;

/// Channel capacity for position watches.
pub const WATCH_CHANNEL_CAPACITY: usize = 16;

/// Trait for platform continuous-location capabilities.
///
/// Implementations begin delivering fixes on [`watch`](Self::watch) and must:
///
/// - send samples in delivery order on the watch's channel
/// - send at most one terminal error, then close the channel
/// - stop producing promptly once the watch's cancellation token fires
///
/// Returns [`PositionError::Unsupported`] when the platform has no location
/// capability at all.
pub trait LocationSource: Send + Sync {
    /// Begin continuous position updates.
    fn watch(&self, config: WatchConfig) -> Result<PositionWatch, PositionError>;
}

/// A live position subscription.
///
/// Yields `Result<PositionSample, PositionError>` events in delivery order.
/// An `Err` event is terminal: the producer closes the channel after sending
/// it, so the watch is implicitly cancelled.
///
/// Dropping the watch cancels it.
pub struct PositionWatch {
    rx: mpsc::Receiver<Result<PositionSample, PositionError>>,
    cancel: CancellationToken,
}

impl PositionWatch {
    /// Create a watch from its channel and cancellation token.
    ///
    /// Intended for [`LocationSource`] implementations.
    pub fn new(
        rx: mpsc::Receiver<Result<PositionSample, PositionError>>,
        cancel: CancellationToken,
    ) -> Self {
        Self { rx, cancel }
    }

    /// Receive the next event, or `None` once the stream has finished.
    pub async fn recv(&mut self) -> Option<Result<PositionSample, PositionError>> {
        self.rx.recv().await
    }

    /// Cancel the watch.
    ///
    /// Idempotent: cancelling an already-cancelled or failed watch is a no-op.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token that fires when the watch is cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

impl Drop for PositionWatch {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
