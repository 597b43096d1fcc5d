//! Commute stage enumeration.

/// The tracking state machine's current phase.
///
/// A single closed enumeration rather than independent booleans, so invalid
/// combinations (alerting without tracking, approaching without having
/// satisfied the pre-alert condition) cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// Not tracking. Initial and terminal.
    #[default]
    Idle,
    /// Tracking, still outside twice the alert radius.
    Active,
    /// Within twice the alert radius; the early haptic cue has fired.
    PreApproaching,
    /// Within the alert radius; the full alarm is running.
    Approaching,
}

impl Stage {
    /// True for every stage except [`Stage::Idle`].
    #[inline]
    pub fn is_tracking(&self) -> bool {
        !matches!(self, Stage::Idle)
    }

    /// True once the final alarm has been raised.
    #[inline]
    pub fn is_alerting(&self) -> bool {
        matches!(self, Stage::Approaching)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Active => write!(f, "Active"),
            Self::PreApproaching => write!(f, "Pre-approaching"),
            Self::Approaching => write!(f, "Approaching"),
        }
    }
}
