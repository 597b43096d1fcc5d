//! User-facing configuration: alarm sound, theme, and settings bundle.
//!
//! The alert distance itself lives in [`crate::commute::AlertDistance`]
//! because the tracker owns its validation; this module bundles it with the
//! remaining preferences.

mod settings;
mod sound;
mod theme;

pub use settings::Settings;
pub use sound::{AlarmSound, ALARM_PRESETS};
pub use theme::{ThemePreference, THEME_KEY};
