//! Alarm sound selection.

use serde::{Deserialize, Serialize};

/// Built-in alarm sounds: (name, url).
pub const ALARM_PRESETS: [(&str, &str); 4] = [
    (
        "Classic Alarm",
        "https://actions.google.com/sounds/v1/alarms/alarm_clock.ogg",
    ),
    (
        "Digital Watch",
        "https://actions.google.com/sounds/v1/alarms/digital_watch_alarm_long.ogg",
    ),
    (
        "Buzzer",
        "https://actions.google.com/sounds/v1/alarms/dosimeter_alarm.ogg",
    ),
    (
        "Gentle Wake",
        "https://actions.google.com/sounds/v1/alarms/wind_chime_alarm.ogg",
    ),
];

/// The sound the alarm loops while Approaching.
///
/// Either one of the four built-in presets or a user-supplied clip
/// (an uploaded blob or local file reference).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmSound {
    /// Index into [`ALARM_PRESETS`].
    Preset(usize),
    /// User-supplied audio clip.
    Custom { name: String, url: String },
}

impl AlarmSound {
    /// Select a preset by index; `None` when out of range.
    pub fn preset(index: usize) -> Option<Self> {
        (index < ALARM_PRESETS.len()).then_some(Self::Preset(index))
    }

    /// Wrap a user-supplied clip.
    pub fn custom(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Custom {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Display name of the sound.
    pub fn name(&self) -> &str {
        match self {
            Self::Preset(i) => ALARM_PRESETS.get(*i).unwrap_or(&ALARM_PRESETS[0]).0,
            Self::Custom { name, .. } => name,
        }
    }

    /// Playback URL or blob reference.
    pub fn url(&self) -> &str {
        match self {
            Self::Preset(i) => ALARM_PRESETS.get(*i).unwrap_or(&ALARM_PRESETS[0]).1,
            Self::Custom { url, .. } => url,
        }
    }
}

impl Default for AlarmSound {
    /// The first preset ("Classic Alarm").
    fn default() -> Self {
        Self::Preset(0)
    }
}
