//! Configuration for position watches.

use std::time::Duration;

/// Default per-fix timeout.
pub const DEFAULT_WATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Options passed to [`LocationSource::watch`](super::LocationSource::watch).
///
/// The defaults request fresh, high-accuracy fixes and never allow a cached
/// fix to be silently reused (`max_cached_age` of zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchConfig {
    /// Request the most accurate fix the platform can provide.
    pub high_accuracy: bool,

    /// Maximum time the platform may take to produce a fix.
    pub timeout: Duration,

    /// Maximum age of a cached fix the platform may return.
    ///
    /// Zero means every fix must be freshly acquired.
    pub max_cached_age: Duration,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: DEFAULT_WATCH_TIMEOUT,
            max_cached_age: Duration::ZERO,
        }
    }
}
