//! LocaLert - commute alert engine
//!
//! This library tracks a commuter's live position against a destination and
//! raises a two-stage alarm as they approach:
//!
//! - **Pre-approaching** at twice the alert radius: a single short haptic cue
//! - **Approaching** at the alert radius: looping audio plus a repeating
//!   vibration pattern until dismissed
//!
//! Destinations can be resolved from free text or a natural-language
//! description through the Gemini API, and recent destinations are kept in a
//! small persistent history.
//!
//! # High-Level API
//!
//! ```ignore
//! use localert::commute::{AlertDistance, CommuteTracker, Destination};
//! use localert::coord::Coordinates;
//!
//! let dest = Destination::new("Central Station", Coordinates::new(12.9766, 77.5713)?);
//! let tracker = CommuteTracker::new(location_source, alarm_sink);
//! tracker.start(Some(dest), AlertDistance::new(0.5)?)?;
//!
//! // Presentation layer polls snapshots
//! let snapshot = tracker.snapshot();
//! println!("stage={} distance={:?}", snapshot.stage, snapshot.distance_km);
//! ```

pub mod commute;
pub mod config;
pub mod coord;
pub mod history;
pub mod logging;
pub mod position;
pub mod resolver;
pub mod storage;

/// Version of the LocaLert library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
