//! Error types for the position stream adapter.

use thiserror::Error;

/// Classified failures from a position watch.
///
/// Platform-specific error codes are mapped into these variants at the
/// adapter boundary so the rest of the system never sees raw codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// The platform has no location capability at all.
    #[error("Location tracking is not supported on this platform")]
    Unsupported,

    /// The user denied location access.
    #[error("Location access denied")]
    PermissionDenied,

    /// The platform could not determine a position.
    #[error("Location information is unavailable")]
    PositionUnavailable,

    /// The fix did not arrive within the configured timeout.
    #[error("The request to get the current location timed out")]
    Timeout,

    /// Any other platform failure.
    #[error("Unknown location error: {0}")]
    Unknown(String),
}

impl PositionError {
    /// Map a W3C geolocation-style error code to a classified variant.
    ///
    /// Codes: 1 = permission denied, 2 = position unavailable, 3 = timeout.
    /// Anything else becomes [`PositionError::Unknown`] carrying the message.
    pub fn from_platform_code(code: u16, message: &str) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable,
            3 => Self::Timeout,
            _ => Self::Unknown(message.to_string()),
        }
    }
}
