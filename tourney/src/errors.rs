//! Error types for bracket configuration and schedule editing.
//!
//! The builders and the greedy scheduler never fail; these errors only come
//! from parsing external input (labels, JSON configs) and from manual edits
//! to a computed schedule.

use thiserror::Error;

/// Result type for bracket operations
pub type BracketResult<T> = Result<T, BracketError>;

/// Bracket errors
#[derive(Debug, Error)]
pub enum BracketError {
    /// A match label that does not follow any known bracket prefix
    #[error("Invalid match label: {0}")]
    InvalidNodeLabel(String),

    /// Bracket configuration rejected by validation
    #[error("Invalid bracket configuration for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Match id not present in the schedule
    #[error("Unknown match: {0}")]
    UnknownMatch(String),

    /// Target slot already held by another match
    #[error("Slot {slot} is already assigned to match {occupant}")]
    SlotOccupied { slot: String, occupant: String },
}

impl BracketError {
    /// Shorthand for an [`BracketError::InvalidConfig`] error
    pub fn invalid_config(field: &str, reason: impl Into<String>) -> Self {
        BracketError::InvalidConfig {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = BracketError::invalid_config("seeds", "Must be at least 2");
        let msg = err.to_string();
        assert!(msg.contains("seeds"));
        assert!(msg.contains("Must be at least 2"));
    }

    #[test]
    fn test_serialization_error_from() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: BracketError = json_err.into();
        assert!(matches!(err, BracketError::Serialization(_)));
    }
}
