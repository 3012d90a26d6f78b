//! Common validation utilities for scalar voice parameters.

use std::fmt;

/// Error type for common validation failures.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonValidationError {
    /// Human-readable error message.
    pub message: String,
}

impl CommonValidationError {
    /// Creates a new validation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommonValidationError {}

fn ensure_finite(name: &str, value: f64) -> Result<(), CommonValidationError> {
    if !value.is_finite() {
        return Err(CommonValidationError::new(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is in [0, 1] (the unit interval).
///
/// # Example
/// ```
/// use archevox_spec::validation::common::validate_unit_interval;
///
/// assert!(validate_unit_interval("tenseness", 0.5).is_ok());
/// assert!(validate_unit_interval("tenseness", 1.5).is_err());
/// ```
pub fn validate_unit_interval(name: &str, value: f64) -> Result<(), CommonValidationError> {
    ensure_finite(name, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(CommonValidationError::new(format!(
            "{} must be in [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is in (0, 1], as required for quotients of a period.
///
/// # Example
/// ```
/// use archevox_spec::validation::common::validate_open_unit_interval;
///
/// assert!(validate_open_unit_interval("open_quotient", 1.0).is_ok());
/// assert!(validate_open_unit_interval("open_quotient", 0.0).is_err());
/// ```
pub fn validate_open_unit_interval(name: &str, value: f64) -> Result<(), CommonValidationError> {
    ensure_finite(name, value)?;
    if value <= 0.0 || value > 1.0 {
        return Err(CommonValidationError::new(format!(
            "{} must be in (0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is positive (> 0).
///
/// # Example
/// ```
/// use archevox_spec::validation::common::validate_positive;
///
/// assert!(validate_positive("duration_seconds", 1.0).is_ok());
/// assert!(validate_positive("duration_seconds", 0.0).is_err());
/// assert!(validate_positive("duration_seconds", -1.0).is_err());
/// ```
pub fn validate_positive(name: &str, value: f64) -> Result<(), CommonValidationError> {
    ensure_finite(name, value)?;
    if value <= 0.0 {
        return Err(CommonValidationError::new(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a frequency is positive and strictly below Nyquist.
///
/// # Example
/// ```
/// use archevox_spec::validation::common::validate_below_nyquist;
///
/// assert!(validate_below_nyquist("f1", 800.0, 48000).is_ok());
/// assert!(validate_below_nyquist("f1", 24000.0, 48000).is_err());
/// ```
pub fn validate_below_nyquist(
    name: &str,
    frequency: f64,
    sample_rate: u32,
) -> Result<(), CommonValidationError> {
    validate_positive(name, frequency)?;
    let nyquist = sample_rate as f64 / 2.0;
    if frequency >= nyquist {
        return Err(CommonValidationError::new(format!(
            "{} must be below Nyquist ({} Hz), got {}",
            name, nyquist, frequency
        )));
    }
    Ok(())
}

/// Validate that a value is within a specified range [min, max].
///
/// # Example
/// ```
/// use archevox_spec::validation::common::validate_range;
///
/// assert!(validate_range("formant_scale", 1.2, 0.25, 4.0).is_ok());
/// assert!(validate_range("formant_scale", 5.0, 0.25, 4.0).is_err());
/// ```
pub fn validate_range(
    name: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), CommonValidationError> {
    ensure_finite(name, value)?;
    if value < min || value > max {
        return Err(CommonValidationError::new(format!(
            "{} must be in [{}, {}], got {}",
            name, min, max, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_unit_interval() {
        assert!(validate_unit_interval("x", 0.0).is_ok());
        assert!(validate_unit_interval("x", 1.0).is_ok());
        assert!(validate_unit_interval("x", -0.01).is_err());
        assert!(validate_unit_interval("x", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_open_unit_interval() {
        assert!(validate_open_unit_interval("oq", 0.01).is_ok());
        assert!(validate_open_unit_interval("oq", 1.0).is_ok());
        let err = validate_open_unit_interval("oq", 0.0).unwrap_err();
        assert!(err.message.contains("(0, 1]"));
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("f0", 1e-6).is_ok());
        let err = validate_positive("f0", 0.0).unwrap_err();
        assert!(err.message.contains("f0"));
        assert!(err.message.contains("positive"));
        assert!(validate_positive("f0", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_below_nyquist() {
        assert!(validate_below_nyquist("f", 23999.0, 48000).is_ok());
        let err = validate_below_nyquist("f", 24000.0, 48000).unwrap_err();
        assert!(err.message.contains("Nyquist"));
        assert!(validate_below_nyquist("f", -5.0, 48000).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("x", 2.0, 1.0, 3.0).is_ok());
        let err = validate_range("x", 4.0, 1.0, 3.0).unwrap_err();
        assert!(err.message.contains("[1, 3]"));
    }
}
