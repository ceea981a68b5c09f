//! Error types for index operations.
//!
//! Every variant except [`IndexError::InternalFault`] is a validation error: a
//! deterministic function of the caller's input, raised before any mutation
//! is attempted.

/// Enumeration of possible index errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IndexError {
    /// Name rejected by validation
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Longitude or latitude out of range, NaN, or infinite
    #[error("Invalid coordinate: longitude {longitude}, latitude {latitude}")]
    InvalidCoordinate { longitude: f64, latitude: f64 },

    /// Radius was negative or not finite
    #[error("Invalid radius: {0}")]
    InvalidRadius(f64),

    /// Distance unit string not recognized
    #[error("Unsupported unit: {0}")]
    UnsupportedUnit(String),

    /// Unexpected internal condition, such as a poisoned namespace lock
    #[error("Internal fault: {0}")]
    InternalFault(String),
}

impl IndexError {
    /// Returns true for errors caused by caller input.
    pub fn is_validation(&self) -> bool {
        !matches!(self, IndexError::InternalFault(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(IndexError::InvalidName(String::new()).is_validation());
        assert!(IndexError::InvalidRadius(-1.0).is_validation());
        assert!(IndexError::UnsupportedUnit("parsec".into()).is_validation());
        assert!(IndexError::InvalidCoordinate {
            longitude: 200.0,
            latitude: 0.0
        }
        .is_validation());
        assert!(!IndexError::InternalFault("lock poisoned".into()).is_validation());
    }

    #[test]
    fn test_error_messages() {
        let err = IndexError::UnsupportedUnit("parsec".into());
        assert_eq!(err.to_string(), "Unsupported unit: parsec");

        let err = IndexError::InvalidRadius(-5.0);
        assert_eq!(err.to_string(), "Invalid radius: -5");
    }
}
