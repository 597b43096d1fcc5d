//! Destination, alert distance, snapshot and error types for commute tracking.

use thiserror::Error;

use super::stage::Stage;
use crate::coord::Coordinates;
use crate::position::PositionError;

/// Minimum configurable alert radius in kilometers.
pub const MIN_ALERT_KM: f64 = 0.1;

/// Maximum configurable alert radius in kilometers.
pub const MAX_ALERT_KM: f64 = 3.0;

/// Where the commuter is headed.
///
/// Set once per commute; replaced only when a new commute starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    /// Display name ("Central Station", "Koramangala Water Tank", ...).
    pub name: String,
    /// Resolved position of the destination.
    pub coords: Coordinates,
}

impl Destination {
    pub fn new(name: impl Into<String>, coords: Coordinates) -> Self {
        Self {
            name: name.into(),
            coords,
        }
    }
}

/// Validated alert radius in kilometers.
///
/// Adjustable only before a commute starts: [`CommuteTracker::start`]
/// consumes the value and there is no set-while-active API.
///
/// [`CommuteTracker::start`]: super::CommuteTracker::start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertDistance(f64);

impl AlertDistance {
    /// Create an alert distance, validating the [0.1, 3.0] km range.
    pub fn new(km: f64) -> Result<Self, TrackingError> {
        if !(MIN_ALERT_KM..=MAX_ALERT_KM).contains(&km) || km.is_nan() {
            return Err(TrackingError::InvalidAlertDistance(km));
        }
        Ok(Self(km))
    }

    /// The radius in kilometers.
    #[inline]
    pub fn km(&self) -> f64 {
        self.0
    }

    /// The pre-alert radius: twice the configured distance.
    ///
    /// A cheap early cue without any network cost; one-way stage transitions
    /// keep it from retriggering.
    #[inline]
    pub fn pre_alert_km(&self) -> f64 {
        self.0 * 2.0
    }
}

impl Default for AlertDistance {
    /// 0.5 km, the slider's starting position.
    fn default() -> Self {
        Self(0.5)
    }
}

/// Read-only view of the tracker's state.
///
/// Owned exclusively by the tracker; the presentation layer only ever sees
/// these copies.
#[derive(Debug, Clone, Default)]
pub struct CommuteSnapshot {
    /// Current phase of the state machine.
    pub stage: Stage,

    /// Great-circle distance to the destination in kilometers.
    ///
    /// `None` only while no sample has been received in the current commute.
    pub distance_km: Option<f64>,

    /// Accuracy of the latest fix in meters.
    pub accuracy_m: Option<f64>,

    /// Classified stream failure from the current or previous commute.
    ///
    /// A failure stops the commute but stays visible here until the next
    /// `start()` so the caller can offer a retry.
    pub last_error: Option<PositionError>,
}

/// Errors from commute tracking operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackingError {
    /// `start` was called without a destination.
    #[error("Destination not set")]
    NoDestination,

    /// The platform has no continuous-location capability.
    #[error("Location tracking is not supported on this platform")]
    UnsupportedPlatform,

    /// Alert distance outside the [0.1, 3.0] km range.
    #[error("Alert distance {0} km is outside the allowed range ({MIN_ALERT_KM}-{MAX_ALERT_KM} km)")]
    InvalidAlertDistance(f64),

    /// Opening the position watch failed.
    #[error(transparent)]
    Position(#[from] PositionError),
}
