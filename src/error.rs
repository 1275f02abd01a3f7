//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition a payroll operation can reject.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// No operation in the engine panics on bad input; rejected mutations are
/// reported through this type and leave state untouched.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::ConfigNotFound {
///     path: "/missing/payroll.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/payroll.yaml");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was rejected.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The configuration field that was rejected.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A salary record was invalid or inconsistent with the record set.
    #[error("Invalid salary record '{id}': {message}")]
    InvalidRecord {
        /// The employee id of the record.
        id: String,
        /// A description of what made the record invalid.
        message: String,
    },

    /// No record exists with the given employee id.
    #[error("Salary record not found: {id}")]
    RecordNotFound {
        /// The employee id that was looked up.
        id: String,
    },

    /// A batch run is already in progress.
    #[error("A payroll batch run is already in progress")]
    BatchAlreadyRunning,

    /// There are no pending records for a batch run to process.
    #[error("No pending salary records to process")]
    NoPendingRecords,
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = PayrollError::ConfigNotFound {
            path: "/missing/payroll.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/payroll.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = PayrollError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_field_and_message() {
        let error = PayrollError::InvalidConfig {
            field: "tds_rate".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration field 'tds_rate': must not be negative"
        );
    }

    #[test]
    fn test_invalid_record_displays_id_and_message() {
        let error = PayrollError::InvalidRecord {
            id: "EMP001".to_string(),
            message: "duplicate employee id".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid salary record 'EMP001': duplicate employee id"
        );
    }

    #[test]
    fn test_batch_errors_display() {
        assert_eq!(
            PayrollError::BatchAlreadyRunning.to_string(),
            "A payroll batch run is already in progress"
        );
        assert_eq!(
            PayrollError::NoPendingRecords.to_string(),
            "No pending salary records to process"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PayrollError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> PayrollResult<()> {
            Err(PayrollError::RecordNotFound {
                id: "EMP404".to_string(),
            })
        }

        fn propagates_error() -> PayrollResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
