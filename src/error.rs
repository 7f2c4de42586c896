//! Error types for the reassignment protocol.
//!
//! Two failure families with different blast radii:
//! [`ValidationError`] means the move never started and nothing changed;
//! it is reported back to the caller inside a successful result.
//! [`PersistError`] means the optimistic mutation was rolled back after
//! the store rejected the write; it is the error arm, surfaced exactly
//! one level up to the notification layer. The work calendar's safety
//! bound is deliberately in neither family: the walk degrades to a
//! best-effort result and a log line instead of failing.

use thiserror::Error;

/// A move request that was rejected before any state changed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The dragged order is not in the current working set.
    #[error("order '{0}' is not in the working set")]
    UnknownOrder(String),

    /// The order's estimate is not a positive number of hours.
    #[error("order '{order_id}' has no usable estimate ({hours} h)")]
    InvalidEstimate {
        /// Order whose estimate was rejected.
        order_id: String,
        /// The estimate that failed validation.
        hours: f64,
    },
}

/// An assignment write the store refused; the working set has already
/// been rolled back to its pre-move snapshot when this surfaces.
#[derive(Debug, Error)]
#[error("failed to persist assignment for order '{order_id}'")]
pub struct PersistError {
    /// Order whose write failed.
    pub order_id: String,
    /// Underlying store failure.
    #[source]
    pub source: anyhow::Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let unknown = ValidationError::UnknownOrder("WO-9".into());
        assert_eq!(unknown.to_string(), "order 'WO-9' is not in the working set");

        let invalid = ValidationError::InvalidEstimate {
            order_id: "WO-9".into(),
            hours: -2.0,
        };
        assert_eq!(
            invalid.to_string(),
            "order 'WO-9' has no usable estimate (-2 h)"
        );
    }

    #[test]
    fn test_persist_error_keeps_source() {
        let err = PersistError {
            order_id: "WO-9".into(),
            source: anyhow::anyhow!("503 service unavailable"),
        };
        assert_eq!(
            err.to_string(),
            "failed to persist assignment for order 'WO-9'"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
