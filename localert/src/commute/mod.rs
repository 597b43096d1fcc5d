//! Commute tracking state machine.
//!
//! The heart of the library: consumes a position stream and a destination,
//! derives distance and alert stage on every sample, and drives the alarm
//! side effects (looping audio, vibration patterns) so they fire exactly
//! once per threshold crossing and are always released on every exit path.
//!
//! # Stages
//!
//! ```text
//! Idle ──start──▶ Active ──d ≤ 2×alert──▶ PreApproaching ──d ≤ alert──▶ Approaching
//!   ▲                                                                        │
//!   └────────────────────────── stop / failure ◀──────────────────────────────┘
//! ```
//!
//! Transitions are monotonic within one commute; `PreApproaching` and
//! `Approaching` are one-way and never re-fire their side effects. Thresholds
//! are evaluated on every sample without debouncing - GPS updates are already
//! rate-limited by the platform, and the one-way transitions prevent
//! retriggering.
//!
//! # Components
//!
//! - [`stage`] - the [`Stage`] enumeration
//! - [`state`] - [`Destination`], [`AlertDistance`], [`CommuteSnapshot`], [`TrackingError`]
//! - [`alarm`] - the [`AlarmSink`] collaborator trait and pattern constants
//! - [`tracker`] - [`CommuteTracker`], the state machine itself
//! - [`dismiss`] - the arithmetic liveness challenge gating alarm dismissal

mod alarm;
mod dismiss;
mod stage;
mod state;
mod tracker;

pub use alarm::{
    AlarmSink, LoggingAlarmSink, NullAlarmSink, ALERT_PATTERN_MS, ALERT_REPEAT_INTERVAL,
    PRE_ALERT_PULSE_MS,
};
pub use dismiss::DismissChallenge;
pub use stage::Stage;
pub use state::{
    AlertDistance, CommuteSnapshot, Destination, TrackingError, MAX_ALERT_KM, MIN_ALERT_KM,
};
pub use tracker::CommuteTracker;
