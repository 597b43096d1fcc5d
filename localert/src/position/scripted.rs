//! Scripted location source for simulation and tests.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::config::WatchConfig;
use super::error::PositionError;
use super::sample::PositionSample;
use super::source::{LocationSource, PositionWatch, WATCH_CHANNEL_CAPACITY};
use crate::coord::Coordinates;

/// One step in a scripted position stream.
#[derive(Debug, Clone)]
pub enum ScriptedEvent {
    /// A position fix.
    Fix {
        coords: Coordinates,
        accuracy_m: f64,
    },
    /// A terminal failure; the stream closes after delivering it.
    Failure(PositionError),
}

/// Replays a fixed sequence of fixes and failures.
///
/// Each [`watch`](LocationSource::watch) call spawns a task that walks the
/// script, optionally sleeping between events, and stops at the first
/// failure, at the end of the script, or when the watch is cancelled.
#[derive(Debug, Clone)]
pub struct ScriptedLocationSource {
    events: Vec<ScriptedEvent>,
    interval: Duration,
}

impl ScriptedLocationSource {
    /// Create a source that replays `events` back-to-back.
    pub fn new(events: Vec<ScriptedEvent>) -> Self {
        Self {
            events,
            interval: Duration::ZERO,
        }
    }

    /// Sleep this long before each event.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

impl LocationSource for ScriptedLocationSource {
    fn watch(&self, _config: WatchConfig) -> Result<PositionWatch, PositionError> {
        let (tx, rx) = mpsc::channel(WATCH_CHANNEL_CAPACITY);
        let cancel = CancellationToken::new();

        let events = self.events.clone();
        let interval = self.interval;
        let token = cancel.clone();
        tokio::spawn(async move {
            for event in events {
                if !interval.is_zero() {
                    tokio::select! {
                        _ = token.cancelled() => break,
                        _ = tokio::time::sleep(interval) => {}
                    }
                }
                if token.is_cancelled() {
                    break;
                }
                match event {
                    ScriptedEvent::Fix { coords, accuracy_m } => {
                        if tx.send(Ok(PositionSample::now(coords, accuracy_m))).await.is_err() {
                            break;
                        }
                    }
                    ScriptedEvent::Failure(err) => {
                        let _ = tx.send(Err(err)).await;
                        break;
                    }
                }
            }
            // tx drops here, closing the stream
        });

        Ok(PositionWatch::new(rx, cancel))
    }
}
