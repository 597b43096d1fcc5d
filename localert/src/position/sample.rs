//! Position sample type.

use std::time::Instant;

use crate::coord::Coordinates;

/// A single position fix from the platform.
///
/// # Timestamp
///
/// The `timestamp` is monotonic and records when the adapter received the
/// fix. The underlying platform does NOT guarantee non-decreasing sample
/// times; duplicate or stale fixes may arrive and are passed through
/// unmodified. Consumers must tolerate them.
#[derive(Debug, Clone, Copy)]
pub struct PositionSample {
    /// Where the platform believes the device is.
    pub coords: Coordinates,

    /// Platform-reported horizontal accuracy in meters.
    ///
    /// Not guaranteed to be monotonically improving.
    pub accuracy_m: f64,

    /// When this fix was received.
    pub timestamp: Instant,
}

impl PositionSample {
    /// Create a sample stamped with the current time.
    pub fn now(coords: Coordinates, accuracy_m: f64) -> Self {
        Self {
            coords,
            accuracy_m,
            timestamp: Instant::now(),
        }
    }
}
