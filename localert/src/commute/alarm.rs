//! Alarm capability trait and pattern constants.

use std::time::Duration;

use crate::config::AlarmSound;

/// Single short haptic pulse for the pre-alert cue (milliseconds).
pub const PRE_ALERT_PULSE_MS: [u64; 1] = [200];

/// Vibration pattern for the final alert (on/off/on milliseconds).
pub const ALERT_PATTERN_MS: [u64; 3] = [600, 200, 600];

/// How often the alert pattern repeats until dismissed.
pub const ALERT_REPEAT_INTERVAL: Duration = Duration::from_millis(1800);

/// Platform alarm outputs (audio + vibration).
///
/// All methods are fire-and-forget with no return value; implementations
/// must not block. The tracker owns the single audio handle and the repeat
/// timer exclusively - no other component may drive these outputs during an
/// active commute.
pub trait AlarmSink: Send + Sync {
    /// Start looping playback of the given sound.
    fn start_audio(&self, sound: &AlarmSound);

    /// Stop playback and reset the play position to the start.
    ///
    /// Must be a no-op when nothing is playing.
    fn stop_audio(&self);

    /// Trigger one run of a vibration pattern (on/off milliseconds).
    fn vibrate(&self, pattern: &[u64]);

    /// Cancel any in-flight vibration (a zero-duration pulse).
    fn cancel_vibration(&self);
}

/// Alarm sink that does nothing.
///
/// For headless use and tests that only care about stage transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAlarmSink;

impl AlarmSink for NullAlarmSink {
    fn start_audio(&self, _sound: &AlarmSound) {}
    fn stop_audio(&self) {}
    fn vibrate(&self, _pattern: &[u64]) {}
    fn cancel_vibration(&self) {}
}

/// Alarm sink that logs every invocation.
///
/// Used by the CLI simulator to make side effects visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingAlarmSink;

impl AlarmSink for LoggingAlarmSink {
    fn start_audio(&self, sound: &AlarmSound) {
        tracing::info!(sound = %sound.name(), "Alarm audio started (looping)");
    }

    fn stop_audio(&self) {
        tracing::info!("Alarm audio stopped");
    }

    fn vibrate(&self, pattern: &[u64]) {
        tracing::info!(?pattern, "Vibration triggered");
    }

    fn cancel_vibration(&self) {
        tracing::debug!("Vibration cancelled");
    }
}
