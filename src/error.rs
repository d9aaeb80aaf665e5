//! Unified error handling for the task-mapper library.
//!
//! One error type covers every fallible operation: polyline decoding,
//! route fetching, and configuration. Pure geometry (distances, hotspot
//! detection) has no error paths and stays out of this enum.

use thiserror::Error;

/// Unified error type for task-mapper operations.
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "ffi", derive(uniffi::Error), uniffi(flat_error))]
pub enum TaskMapError {
    /// Polyline byte stream ended in the middle of a coordinate group.
    #[error("polyline truncated inside a coordinate group at byte {position}")]
    TruncatedPolyline { position: usize },

    /// Polyline contained a byte outside the encodable range (63..=126).
    #[error("invalid polyline byte {byte:#04x} at position {position}")]
    InvalidPolylineByte { byte: u8, position: usize },

    /// Decoded coordinate fell outside valid latitude/longitude ranges.
    #[error("decoded coordinate ({latitude}, {longitude}) is out of range")]
    CoordinateOutOfRange { latitude: f64, longitude: f64 },

    /// Transport-level failure talking to the directions service.
    #[error("directions request failed: {message}")]
    Network { message: String },

    /// Directions service answered with a non-success HTTP status.
    #[error("directions service returned HTTP {status_code}")]
    Http { status_code: u16 },

    /// Directions service answered 200 but with a non-OK body status.
    #[error("directions service returned status '{status}'")]
    Directions { status: String },

    /// Directions response contained no routes.
    #[error("directions response contained no routes")]
    NoRoute,

    /// Response body could not be parsed against the expected contract.
    #[error("invalid directions response: {message}")]
    InvalidResponse { message: String },

    /// Configuration error (bad base URL, empty API key, ...).
    #[error("configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for task-mapper operations.
pub type Result<T, E = TaskMapError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TaskMapError::TruncatedPolyline { position: 7 };
        assert!(err.to_string().contains("byte 7"));

        let err = TaskMapError::Http { status_code: 503 };
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_directions_status_display() {
        let err = TaskMapError::Directions {
            status: "ZERO_RESULTS".to_string(),
        };
        assert!(err.to_string().contains("ZERO_RESULTS"));
    }
}
