//! Position stream adapter.
//!
//! Bridges a platform continuous-location capability into a cancellable
//! subscription yielding [`PositionSample`] events or classified failures.
//!
//! # Architecture
//!
//! The platform capability is modeled as the [`LocationSource`] trait so the
//! commute tracker never touches a global API directly and tests can inject
//! fakes. A successful [`LocationSource::watch`] call returns a
//! [`PositionWatch`]: an mpsc receiver of `Result<PositionSample, PositionError>`
//! paired with a cancellation token.
//!
//! Guarantees at this boundary:
//!
//! - Samples are delivered strictly in the order the platform produced them;
//!   no reordering or buffering beyond the channel. If the platform delivers
//!   temporally stale fixes, consumers see them as-is.
//! - A yielded error is terminal: the implementation closes the channel after
//!   sending it.
//! - Cancellation is explicit and idempotent; cancelling an already-cancelled
//!   or failed watch is a no-op. Dropping the watch cancels it.
//!
//! [`ScriptedLocationSource`] replays a fixed event sequence and backs both
//! the test suites and the CLI's tracking simulator.

mod config;
mod error;
mod sample;
mod scripted;
mod source;

pub use config::WatchConfig;
pub use error::PositionError;
pub use sample::PositionSample;
pub use scripted::{ScriptedEvent, ScriptedLocationSource};
pub use source::{LocationSource, PositionWatch, WATCH_CHANNEL_CAPACITY};
