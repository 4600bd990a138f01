//! Configuration validation.
//!
//! Checks a [`SimulationConfig`] before an engine is built from it.
//! Detects:
//! - An empty fleet (no dispatch could ever succeed)
//! - A building without floors
//! - Non-positive or non-finite lift speed
//! - A zero retry interval (the retry tick would never advance time)
//! - Non-finite floor or initial positions
//!
//! All problems are collected, not just the first one.

use crate::config::SimulationConfig;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// `fleet_size` is zero.
    EmptyFleet,
    /// `floor_positions` is empty.
    NoFloors,
    /// `speed` is zero, negative, NaN or infinite.
    InvalidSpeed,
    /// `retry_interval_ms` is zero.
    InvalidRetryInterval,
    /// A floor or initial position is NaN or infinite.
    NonFinitePosition,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a simulation configuration.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &SimulationConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.fleet_size == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyFleet,
            "fleet size must be at least 1",
        ));
    }

    if config.floor_positions.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoFloors,
            "at least one floor position is required",
        ));
    }

    if !(config.speed.is_finite() && config.speed > 0.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidSpeed,
            format!("speed must be positive and finite, got {}", config.speed),
        ));
    }

    if config.retry_interval_ms == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidRetryInterval,
            "retry interval must be at least 1 ms",
        ));
    }

    for (floor, position) in config.floor_positions.iter().enumerate() {
        if !position.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFinitePosition,
                format!("floor {floor} has non-finite position {position}"),
            ));
        }
    }

    if let Some(initial) = config.initial_position {
        if !initial.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFinitePosition,
                format!("initial position {initial} is not finite"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_config() {
        let config = SimulationConfig::new(3, vec![0.0, 100.0, 200.0]);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_fleet() {
        let config = SimulationConfig::new(0, vec![0.0]);
        assert_eq!(kinds(validate_config(&config)), vec![ValidationErrorKind::EmptyFleet]);
    }

    #[test]
    fn test_no_floors() {
        let config = SimulationConfig::new(2, vec![]);
        assert_eq!(kinds(validate_config(&config)), vec![ValidationErrorKind::NoFloors]);
    }

    #[test]
    fn test_bad_speed() {
        for speed in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let config = SimulationConfig::new(1, vec![0.0]).with_speed(speed);
            assert_eq!(
                kinds(validate_config(&config)),
                vec![ValidationErrorKind::InvalidSpeed]
            );
        }
    }

    #[test]
    fn test_zero_retry_interval() {
        let config = SimulationConfig::new(1, vec![0.0]).with_retry_interval_ms(0);
        assert_eq!(
            kinds(validate_config(&config)),
            vec![ValidationErrorKind::InvalidRetryInterval]
        );
    }

    #[test]
    fn test_non_finite_positions() {
        let config = SimulationConfig::new(1, vec![0.0, f64::NAN])
            .with_initial_position(f64::NEG_INFINITY);
        assert_eq!(
            kinds(validate_config(&config)),
            vec![
                ValidationErrorKind::NonFinitePosition,
                ValidationErrorKind::NonFinitePosition
            ]
        );
    }

    #[test]
    fn test_collects_all_errors() {
        let config = SimulationConfig::new(0, vec![])
            .with_speed(0.0)
            .with_retry_interval_ms(0);
        let errs = validate_config(&config).unwrap_err();
        assert_eq!(errs.len(), 4);
    }
}
