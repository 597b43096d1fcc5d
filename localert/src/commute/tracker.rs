//! The commute tracker state machine.

use std::sync::{Arc, Mutex, RwLock};

use tokio_util::sync::CancellationToken;

use super::alarm::{
    AlarmSink, ALERT_PATTERN_MS, ALERT_REPEAT_INTERVAL, PRE_ALERT_PULSE_MS,
};
use super::stage::Stage;
use super::state::{AlertDistance, CommuteSnapshot, Destination, TrackingError};
use crate::config::AlarmSound;
use crate::coord::great_circle_km;
use crate::position::{LocationSource, PositionError, PositionSample, WatchConfig};

/// Internal mutable state, owned exclusively by the tracker.
#[derive(Debug, Default)]
struct TrackerState {
    stage: Stage,
    distance_km: Option<f64>,
    accuracy_m: Option<f64>,
    last_error: Option<PositionError>,
}

/// Resources held by one active commute.
///
/// Both tokens are cancelled on every exit path so no subscription, repeat
/// timer, or looping audio can outlive the commute.
struct Session {
    /// Cancels the position subscription and its consumer task.
    watch_cancel: CancellationToken,
    /// Cancels the repeating vibration task.
    alarm_cancel: CancellationToken,
}

/// Commute tracking state machine.
///
/// Consumes position samples, derives distance and alert stage, and drives
/// the alarm side effects. See the [module docs](super) for the stage
/// diagram and threshold policy.
///
/// All platform capabilities are injected: the [`LocationSource`] produces
/// the sample stream and the [`AlarmSink`] receives the side effects, so
/// tests substitute fakes for both.
///
/// Sample callbacks check the stage before mutating state, so a callback
/// that was already scheduled when `stop()` ran is a safe no-op.
pub struct CommuteTracker<S, A: AlarmSink> {
    source: Arc<S>,
    alarm: Arc<A>,
    sound: AlarmSound,
    watch_config: WatchConfig,
    inner: Arc<RwLock<TrackerState>>,
    session: Mutex<Option<Session>>,
}

impl<S, A> CommuteTracker<S, A>
where
    S: LocationSource + 'static,
    A: AlarmSink + 'static,
{
    /// Create an idle tracker with the default alarm sound and watch config.
    pub fn new(source: S, alarm: A) -> Self {
        Self {
            source: Arc::new(source),
            alarm: Arc::new(alarm),
            sound: AlarmSound::default(),
            watch_config: WatchConfig::default(),
            inner: Arc::new(RwLock::new(TrackerState::default())),
            session: Mutex::new(None),
        }
    }

    /// Use a different alarm sound. Takes effect at the next alert.
    pub fn with_sound(mut self, sound: AlarmSound) -> Self {
        self.sound = sound;
        self
    }

    /// Start a commute.
    ///
    /// Requires a destination (`NoDestination` otherwise) and a working
    /// location capability (`UnsupportedPlatform` otherwise). Any previous
    /// commute is torn down first; prior distance, accuracy, and error are
    /// cleared. Transitions Idle → Active and begins consuming samples.
    pub fn start(
        &self,
        destination: Option<Destination>,
        alert_distance: AlertDistance,
    ) -> Result<(), TrackingError> {
        let destination = destination.ok_or(TrackingError::NoDestination)?;

        // Starting replaces any commute already in flight.
        self.stop();

        let mut watch = self.source.watch(self.watch_config).map_err(|e| match e {
            PositionError::Unsupported => TrackingError::UnsupportedPlatform,
            other => TrackingError::Position(other),
        })?;

        {
            let mut st = self.inner.write().unwrap();
            st.stage = Stage::Active;
            st.distance_km = None;
            st.accuracy_m = None;
            st.last_error = None;
        }

        let watch_cancel = watch.cancellation_token();
        let alarm_cancel = CancellationToken::new();
        *self.session.lock().unwrap() = Some(Session {
            watch_cancel: watch_cancel.clone(),
            alarm_cancel: alarm_cancel.clone(),
        });

        tracing::info!(
            destination = %destination.name,
            alert_km = alert_distance.km(),
            "Commute started"
        );

        let inner = Arc::clone(&self.inner);
        let alarm = Arc::clone(&self.alarm);
        let sound = self.sound.clone();
        tokio::spawn(async move {
            loop {
                let event = tokio::select! {
                    _ = watch_cancel.cancelled() => break,
                    event = watch.recv() => event,
                };
                match event {
                    Some(Ok(sample)) => apply_sample(
                        &inner,
                        &alarm,
                        &sound,
                        &destination,
                        alert_distance,
                        &watch_cancel,
                        &alarm_cancel,
                        sample,
                    ),
                    Some(Err(err)) => {
                        // Teardown like stop(), but keep the error visible
                        // until the next start().
                        tracing::warn!(error = %err, "Position stream failed, stopping commute");
                        {
                            let mut st = inner.write().unwrap();
                            st.stage = Stage::Idle;
                            st.distance_km = None;
                            st.accuracy_m = None;
                            st.last_error = Some(err);
                        }
                        alarm_cancel.cancel();
                        alarm.stop_audio();
                        alarm.cancel_vibration();
                        break;
                    }
                    // Stream ended without an error; keep the current stage
                    // (an already-raised alarm keeps ringing until dismissed).
                    None => break,
                }
            }
        });

        Ok(())
    }

    /// Stop the current commute.
    ///
    /// Idempotent: the second of two consecutive calls is a no-op. Cancels
    /// the subscription, stops audio, clears the repeat vibration timer,
    /// issues a zero-duration vibration, and resets to an empty Idle state.
    pub fn stop(&self) {
        let Some(session) = self.session.lock().unwrap().take() else {
            return;
        };

        session.watch_cancel.cancel();
        session.alarm_cancel.cancel();

        // The state must read Idle before the audio teardown below: a sample
        // callback racing this call serializes on the state lock, so once it
        // acquires the lock it observes Idle and cannot re-raise the alarm.
        {
            let mut st = self.inner.write().unwrap();
            st.stage = Stage::Idle;
            st.distance_km = None;
            st.accuracy_m = None;
            st.last_error = None;
        }

        self.alarm.stop_audio();
        self.alarm.cancel_vibration();

        tracing::info!("Commute stopped");
    }

    /// A copy of the current state for the presentation layer.
    pub fn snapshot(&self) -> CommuteSnapshot {
        let st = self.inner.read().unwrap();
        CommuteSnapshot {
            stage: st.stage,
            distance_km: st.distance_km,
            accuracy_m: st.accuracy_m,
            last_error: st.last_error.clone(),
        }
    }

    /// Current stage (convenience over [`snapshot`](Self::snapshot)).
    pub fn stage(&self) -> Stage {
        self.inner.read().unwrap().stage
    }
}

impl<S, A: AlarmSink> Drop for CommuteTracker<S, A> {
    fn drop(&mut self) {
        // Same teardown as stop(): no timer, subscription, or looping audio
        // may survive the tracker.
        if let Ok(mut guard) = self.session.lock() {
            if let Some(session) = guard.take() {
                session.watch_cancel.cancel();
                session.alarm_cancel.cancel();
                if let Ok(mut st) = self.inner.write() {
                    st.stage = Stage::Idle;
                    st.distance_km = None;
                    st.accuracy_m = None;
                    st.last_error = None;
                }
                self.alarm.stop_audio();
                self.alarm.cancel_vibration();
            }
        }
    }
}

/// Apply one position sample to the state machine.
///
/// No-ops when the tracker is Idle or when this sample's own watch has been
/// cancelled: a sample already in flight when `stop()` ran must not
/// resurrect state or retrigger alarms, and a sample from a torn-down
/// commute must not leak into the one that replaced it.
fn apply_sample<A: AlarmSink + 'static>(
    inner: &Arc<RwLock<TrackerState>>,
    alarm: &Arc<A>,
    sound: &AlarmSound,
    destination: &Destination,
    alert_distance: AlertDistance,
    watch_cancel: &CancellationToken,
    alarm_cancel: &CancellationToken,
    sample: PositionSample,
) {
    let mut st = inner.write().unwrap();
    if watch_cancel.is_cancelled() || !st.stage.is_tracking() {
        return;
    }

    let distance = great_circle_km(sample.coords, destination.coords);
    st.distance_km = Some(distance);
    st.accuracy_m = Some(sample.accuracy_m);

    tracing::debug!(
        distance_km = distance,
        accuracy_m = sample.accuracy_m,
        stage = %st.stage,
        "Position sample applied"
    );

    // Pre-alert at twice the radius: one-way per commute, haptic only.
    if st.stage == Stage::Active && distance <= alert_distance.pre_alert_km() {
        st.stage = Stage::PreApproaching;
        tracing::info!(distance_km = distance, "Pre-alert threshold crossed");
        alarm.vibrate(&PRE_ALERT_PULSE_MS);
    }

    // Final alert: start audio and the repeating vibration exactly once.
    if st.stage != Stage::Approaching && distance <= alert_distance.km() {
        st.stage = Stage::Approaching;
        tracing::info!(
            distance_km = distance,
            destination = %destination.name,
            "Alert threshold crossed, raising alarm"
        );
        alarm.start_audio(sound);
        alarm.vibrate(&ALERT_PATTERN_MS);
        spawn_vibration_repeat(Arc::clone(alarm), alarm_cancel.clone());
    }
}

/// Repeat the alert vibration pattern until the token fires.
fn spawn_vibration_repeat<A: AlarmSink + 'static>(alarm: Arc<A>, cancel: CancellationToken) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(ALERT_REPEAT_INTERVAL);
        // Consume the immediate tick; the first pattern already fired.
        interval.tick().await;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => alarm.vibrate(&ALERT_PATTERN_MS),
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::coord::{Coordinates, EARTH_RADIUS_KM};
    use crate::position::{PositionWatch, ScriptedEvent, ScriptedLocationSource};

    /// Alarm sink that records every invocation.
    #[derive(Default)]
    struct RecordingAlarm {
        audio_starts: AtomicUsize,
        audio_stops: AtomicUsize,
        vibrations: Mutex<Vec<Vec<u64>>>,
        vibration_cancels: AtomicUsize,
    }

    impl AlarmSink for Arc<RecordingAlarm> {
        fn start_audio(&self, _sound: &AlarmSound) {
            self.audio_starts.fetch_add(1, Ordering::SeqCst);
        }
        fn stop_audio(&self) {
            self.audio_stops.fetch_add(1, Ordering::SeqCst);
        }
        fn vibrate(&self, pattern: &[u64]) {
            self.vibrations.lock().unwrap().push(pattern.to_vec());
        }
        fn cancel_vibration(&self) {
            self.vibration_cancels.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Location source whose platform has no geolocation at all.
    struct UnsupportedSource;

    impl LocationSource for UnsupportedSource {
        fn watch(&self, _config: WatchConfig) -> Result<PositionWatch, PositionError> {
            Err(PositionError::Unsupported)
        }
    }

    /// Destination at the origin; samples on the equator at a given range.
    fn destination() -> Destination {
        Destination::new("Test Stop", Coordinates::new(0.0, 0.0).unwrap())
    }

    fn coords_at_km(km: f64) -> Coordinates {
        let lon = (km / EARTH_RADIUS_KM).to_degrees();
        Coordinates::new(0.0, lon).unwrap()
    }

    fn fix_at_km(km: f64) -> ScriptedEvent {
        ScriptedEvent::Fix {
            coords: coords_at_km(km),
            accuracy_m: 10.0,
        }
    }

    fn alert_half_km() -> AlertDistance {
        AlertDistance::new(0.5).unwrap()
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(60)).await;
    }

    #[tokio::test]
    async fn test_start_without_destination_fails() {
        let alarm = Arc::new(RecordingAlarm::default());
        let tracker = CommuteTracker::new(ScriptedLocationSource::new(vec![]), alarm);
        let result = tracker.start(None, alert_half_km());
        assert_eq!(result, Err(TrackingError::NoDestination));
        assert_eq!(tracker.stage(), Stage::Idle);
    }

    #[tokio::test]
    async fn test_start_on_unsupported_platform_fails() {
        let alarm = Arc::new(RecordingAlarm::default());
        let tracker = CommuteTracker::new(UnsupportedSource, alarm);
        let result = tracker.start(Some(destination()), alert_half_km());
        assert_eq!(result, Err(TrackingError::UnsupportedPlatform));
        assert_eq!(tracker.stage(), Stage::Idle);
    }

    #[tokio::test]
    async fn test_stage_progression_through_thresholds() {
        // Distances 5.0, 1.2, 0.9, 0.4, 0.3 km with a 0.5 km alert radius:
        // pre-alert crossing at <= 1.0 km, alert crossing at <= 0.5 km.
        let source = ScriptedLocationSource::new(vec![
            fix_at_km(5.0),
            fix_at_km(1.2),
            fix_at_km(0.9),
            fix_at_km(0.4),
            fix_at_km(0.3),
        ]);
        let alarm = Arc::new(RecordingAlarm::default());
        let tracker = CommuteTracker::new(source, Arc::clone(&alarm));

        tracker.start(Some(destination()), alert_half_km()).unwrap();
        settle().await;

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.stage, Stage::Approaching);
        let distance = snapshot.distance_km.unwrap();
        assert!((distance - 0.3).abs() < 0.01, "expected ~0.3 km, got {distance}");
        assert_eq!(snapshot.accuracy_m, Some(10.0));

        // Audio started exactly once even though two samples were <= 0.5 km
        assert_eq!(alarm.audio_starts.load(Ordering::SeqCst), 1);

        // Exactly one pre-alert pulse, then the alert pattern once
        // (repeats are 1800 ms apart, far beyond this test's window)
        let vibrations = alarm.vibrations.lock().unwrap().clone();
        assert_eq!(vibrations[0], PRE_ALERT_PULSE_MS.to_vec());
        assert_eq!(vibrations[1], ALERT_PATTERN_MS.to_vec());
        assert_eq!(vibrations.len(), 2);
    }

    #[tokio::test]
    async fn test_sample_under_both_thresholds_passes_through_pre_alert() {
        // First sample is already inside the alert radius: the machine still
        // passes through PreApproaching logically, firing both cues once.
        let source = ScriptedLocationSource::new(vec![fix_at_km(0.2)]);
        let alarm = Arc::new(RecordingAlarm::default());
        let tracker = CommuteTracker::new(source, Arc::clone(&alarm));

        tracker.start(Some(destination()), alert_half_km()).unwrap();
        settle().await;

        assert_eq!(tracker.stage(), Stage::Approaching);
        let vibrations = alarm.vibrations.lock().unwrap().clone();
        assert_eq!(vibrations[0], PRE_ALERT_PULSE_MS.to_vec());
        assert_eq!(vibrations[1], ALERT_PATTERN_MS.to_vec());
        assert_eq!(alarm.audio_starts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pre_alert_does_not_refire() {
        // Hover around the pre-alert boundary; the pulse fires once.
        let source = ScriptedLocationSource::new(vec![
            fix_at_km(0.9),
            fix_at_km(1.5),
            fix_at_km(0.8),
            fix_at_km(0.95),
        ]);
        let alarm = Arc::new(RecordingAlarm::default());
        let tracker = CommuteTracker::new(source, Arc::clone(&alarm));

        tracker.start(Some(destination()), alert_half_km()).unwrap();
        settle().await;

        assert_eq!(tracker.stage(), Stage::PreApproaching);
        let vibrations = alarm.vibrations.lock().unwrap().clone();
        assert_eq!(vibrations, vec![PRE_ALERT_PULSE_MS.to_vec()]);
        assert_eq!(alarm.audio_starts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let source = ScriptedLocationSource::new(vec![fix_at_km(0.3)]);
        let alarm = Arc::new(RecordingAlarm::default());
        let tracker = CommuteTracker::new(source, Arc::clone(&alarm));

        tracker.start(Some(destination()), alert_half_km()).unwrap();
        settle().await;
        assert_eq!(tracker.stage(), Stage::Approaching);

        tracker.stop();
        tracker.stop(); // second call must be a pure no-op

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.stage, Stage::Idle);
        assert!(snapshot.distance_km.is_none());
        assert!(snapshot.accuracy_m.is_none());
        assert!(snapshot.last_error.is_none());

        // One audio stop and one vibration cancel, not two
        assert_eq!(alarm.audio_stops.load(Ordering::SeqCst), 1);
        assert_eq!(alarm.vibration_cancels.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stream_failure_preserves_error_until_next_start() {
        let source = ScriptedLocationSource::new(vec![
            fix_at_km(0.9), // reaches PreApproaching
            ScriptedEvent::Failure(PositionError::PositionUnavailable),
        ]);
        let alarm = Arc::new(RecordingAlarm::default());
        let tracker = CommuteTracker::new(source.clone(), Arc::clone(&alarm));

        tracker.start(Some(destination()), alert_half_km()).unwrap();
        settle().await;

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.stage, Stage::Idle);
        assert!(snapshot.distance_km.is_none());
        assert!(snapshot.accuracy_m.is_none());
        assert_eq!(snapshot.last_error, Some(PositionError::PositionUnavailable));

        // Re-starting clears the error
        tracker.start(Some(destination()), alert_half_km()).unwrap();
        assert!(tracker.snapshot().last_error.is_none());
    }

    #[tokio::test]
    async fn test_failure_while_alerting_tears_down_alarm() {
        let source = ScriptedLocationSource::new(vec![
            fix_at_km(0.3),
            ScriptedEvent::Failure(PositionError::Timeout),
        ]);
        let alarm = Arc::new(RecordingAlarm::default());
        let tracker = CommuteTracker::new(source, Arc::clone(&alarm));

        tracker.start(Some(destination()), alert_half_km()).unwrap();
        settle().await;

        assert_eq!(tracker.stage(), Stage::Idle);
        assert_eq!(alarm.audio_stops.load(Ordering::SeqCst), 1);
        assert_eq!(alarm.vibration_cancels.load(Ordering::SeqCst), 1);
        assert_eq!(
            tracker.snapshot().last_error,
            Some(PositionError::Timeout)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_vibration_repeats_until_stopped() {
        let source = ScriptedLocationSource::new(vec![fix_at_km(0.3)]);
        let alarm = Arc::new(RecordingAlarm::default());
        let tracker = CommuteTracker::new(source, Arc::clone(&alarm));

        tracker.start(Some(destination()), alert_half_km()).unwrap();
        // Let the sample loop run under the paused clock
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
        assert_eq!(tracker.stage(), Stage::Approaching);

        // Two repeat intervals: pattern fires twice more
        tokio::time::advance(ALERT_REPEAT_INTERVAL).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        tokio::time::advance(ALERT_REPEAT_INTERVAL).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }

        let count_alert_patterns = |v: &Vec<Vec<u64>>| {
            v.iter().filter(|p| p.as_slice() == ALERT_PATTERN_MS).count()
        };
        let vibrations = alarm.vibrations.lock().unwrap().clone();
        assert_eq!(count_alert_patterns(&vibrations), 3);

        tracker.stop();
        tokio::time::advance(ALERT_REPEAT_INTERVAL).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        let vibrations = alarm.vibrations.lock().unwrap().clone();
        assert_eq!(
            count_alert_patterns(&vibrations),
            3,
            "repeat task must not outlive stop()"
        );
    }

    #[tokio::test]
    async fn test_start_clears_previous_commute_state() {
        let source = ScriptedLocationSource::new(vec![fix_at_km(0.9)]);
        let alarm = Arc::new(RecordingAlarm::default());
        let tracker = CommuteTracker::new(source, Arc::clone(&alarm));

        tracker.start(Some(destination()), alert_half_km()).unwrap();
        settle().await;
        assert_eq!(tracker.stage(), Stage::PreApproaching);
        assert!(tracker.snapshot().distance_km.is_some());

        // New commute: distance is null again until the first sample lands
        tracker.start(Some(destination()), alert_half_km()).unwrap();
        assert_eq!(tracker.stage(), Stage::Active);
        assert!(tracker.snapshot().distance_km.is_none());
    }

    #[tokio::test]
    async fn test_sample_from_cancelled_watch_is_ignored() {
        // A callback from a torn-down commute may land after a new commute
        // has set the stage back to Active. Its own watch token is cancelled,
        // so it must not touch the new commute's state or alarms.
        let inner = Arc::new(RwLock::new(TrackerState {
            stage: Stage::Active,
            ..Default::default()
        }));
        let alarm = Arc::new(RecordingAlarm::default());
        let sink = Arc::new(Arc::clone(&alarm));
        let stale_watch = CancellationToken::new();
        stale_watch.cancel();

        apply_sample(
            &inner,
            &sink,
            &AlarmSound::default(),
            &destination(),
            alert_half_km(),
            &stale_watch,
            &CancellationToken::new(),
            PositionSample::now(coords_at_km(0.2), 10.0),
        );

        let st = inner.read().unwrap();
        assert_eq!(st.stage, Stage::Active, "stale sample must not advance the stage");
        assert!(st.distance_km.is_none());
        assert!(st.accuracy_m.is_none());
        assert_eq!(alarm.audio_starts.load(Ordering::SeqCst), 0);
        assert!(alarm.vibrations.lock().unwrap().is_empty());
    }

    /// Ordered-effect sink whose first vibration blocks until released,
    /// holding the sample callback mid-side-effect.
    struct GatedAlarm {
        effects: Mutex<Vec<&'static str>>,
        entered: std::sync::mpsc::Sender<()>,
        release: Mutex<Option<std::sync::mpsc::Receiver<()>>>,
    }

    impl AlarmSink for Arc<GatedAlarm> {
        fn start_audio(&self, _sound: &AlarmSound) {
            self.effects.lock().unwrap().push("start_audio");
        }
        fn stop_audio(&self) {
            self.effects.lock().unwrap().push("stop_audio");
        }
        fn vibrate(&self, _pattern: &[u64]) {
            self.effects.lock().unwrap().push("vibrate");
            let gate = self.release.lock().unwrap().take();
            if let Some(gate) = gate {
                let _ = self.entered.send(());
                let _ = gate.recv();
            }
        }
        fn cancel_vibration(&self) {
            self.effects.lock().unwrap().push("cancel_vibration");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_stop_racing_in_flight_sample_still_silences_alarm() {
        // The sample callback is blocked inside its first side effect while
        // stop() runs on another thread. stop() must serialize on the state
        // lock, so any audio the callback raises is stopped afterwards and
        // never left looping.
        let (entered_tx, entered_rx) = std::sync::mpsc::channel();
        let (release_tx, release_rx) = std::sync::mpsc::channel();
        let alarm = Arc::new(GatedAlarm {
            effects: Mutex::new(Vec::new()),
            entered: entered_tx,
            release: Mutex::new(Some(release_rx)),
        });

        let source = ScriptedLocationSource::new(vec![fix_at_km(0.2)]);
        let tracker = Arc::new(CommuteTracker::new(source, Arc::clone(&alarm)));
        tracker.start(Some(destination()), alert_half_km()).unwrap();

        // Wait until the callback is inside vibrate() holding the state lock
        entered_rx
            .recv_timeout(Duration::from_secs(2))
            .expect("callback never reached the alarm sink");

        let stopper = {
            let tracker = Arc::clone(&tracker);
            std::thread::spawn(move || tracker.stop())
        };
        // Let stop() reach the state lock, then release the callback
        std::thread::sleep(Duration::from_millis(50));
        release_tx.send(()).unwrap();
        stopper.join().unwrap();

        let effects = alarm.effects.lock().unwrap().clone();
        let last_stop = effects
            .iter()
            .rposition(|e| *e == "stop_audio")
            .expect("stop() must stop audio");
        if let Some(last_start) = effects.iter().rposition(|e| *e == "start_audio") {
            assert!(
                last_start < last_stop,
                "audio raised by the racing callback must be stopped: {effects:?}"
            );
        }
        assert_eq!(tracker.stage(), Stage::Idle);
    }
}
