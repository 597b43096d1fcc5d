//! Settings bundle.

use super::sound::AlarmSound;
use super::theme::ThemePreference;
use crate::commute::AlertDistance;

/// User-facing configuration for a commute session.
///
/// The alert distance is adjustable only before a commute starts; the
/// tracker consumes it at `start()` and offers no set-while-active API.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Alert radius, 0.1 to 3.0 km.
    pub alert_distance: AlertDistance,
    /// Sound looped during the final alert.
    pub alarm_sound: AlarmSound,
    /// Display theme.
    pub theme: ThemePreference,
}
