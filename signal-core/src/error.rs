//! Error types for the signal core.

use thiserror::Error;

use crate::params::LinkedField;

/// A user-supplied value that cannot be used.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The field text does not parse as a real number
    #[error("{field}: '{text}' is not a number")]
    NotANumber { field: String, text: String },

    /// NaN or infinity
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// ω0, T and the plot duration must be strictly positive
    #[error("{field} must be a positive number, got {value}")]
    NotPositive { field: String, value: f64 },

    /// More components than the evaluator supports
    #[error("at most {max} {what} are supported, got {count}")]
    TooMany {
        what: &'static str,
        max: usize,
        count: usize,
    },
}

/// Signal core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The user refused to let an edit override the authoritative field
    #[error("changing {0} was declined")]
    ConfirmationDeclined(LinkedField),
}

/// Result alias for signal core operations
pub type Result<T> = std::result::Result<T, SignalError>;

impl ValidationError {
    pub(crate) fn not_positive(field: impl Into<String>, value: f64) -> Self {
        Self::NotPositive {
            field: field.into(),
            value,
        }
    }

    pub(crate) fn not_finite(field: impl Into<String>) -> Self {
        Self::NotFinite {
            field: field.into(),
        }
    }
}

/// Checks that `value` is finite and strictly positive.
pub(crate) fn require_positive(field: &str, value: f64) -> std::result::Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::not_finite(field));
    }
    if value <= 0.0 {
        return Err(ValidationError::not_positive(field, value));
    }
    Ok(value)
}

/// Checks that `value` is finite.
pub(crate) fn require_finite(field: &str, value: f64) -> std::result::Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::not_finite(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_check_rejects_zero_negative_and_nan() {
        assert!(require_positive("T", 1.5).is_ok());
        assert_eq!(
            require_positive("T", 0.0),
            Err(ValidationError::not_positive("T", 0.0))
        );
        assert!(matches!(
            require_positive("T", -2.0),
            Err(ValidationError::NotPositive { .. })
        ));
        assert!(matches!(
            require_positive("T", f64::NAN),
            Err(ValidationError::NotFinite { .. })
        ));
        assert!(matches!(
            require_positive("T", f64::INFINITY),
            Err(ValidationError::NotFinite { .. })
        ));
    }

    #[test]
    fn messages_name_the_field() {
        let err = ValidationError::NotANumber {
            field: "amplitude 2".into(),
            text: "abc".into(),
        };
        assert_eq!(err.to_string(), "amplitude 2: 'abc' is not a number");

        let err: SignalError = ValidationError::not_positive("w0", -1.0).into();
        assert_eq!(err.to_string(), "w0 must be a positive number, got -1");

        let err = SignalError::ConfirmationDeclined(LinkedField::Period);
        assert_eq!(err.to_string(), "changing T was declined");
    }
}
