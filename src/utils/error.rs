use thiserror::Error;

#[derive(Error, Debug)]
pub enum NumeralError {
    #[error("Invalid input: {value} (decimal must be non-negative)")]
    InvalidInput { value: i64 },

    #[error("Input too large: {value} does not fit in memory as a unary string")]
    InputTooLarge { value: i64 },

    #[error("Invalid substitution rule #{index}: {reason}")]
    InvalidRuleError { index: usize, reason: String },

    #[error("Variants disagree on {input}: {left} -> {left_output:?}, {right} -> {right_output:?}")]
    VariantMismatch {
        input: i64,
        left: String,
        left_output: String,
        right: String,
        right_output: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    High,
    Critical,
}

impl NumeralError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            NumeralError::VariantMismatch { .. } => ErrorSeverity::Critical,
            NumeralError::IoError(_) | NumeralError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
            NumeralError::InvalidInput { .. } | NumeralError::InputTooLarge { .. } => {
                ErrorSeverity::Low
            }
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            NumeralError::InvalidInput { value } => {
                format!("Cannot convert {}: only non-negative numbers have a numeral", value)
            }
            NumeralError::InputTooLarge { value } => {
                format!("Cannot convert {}: the number is too large to expand", value)
            }
            NumeralError::InvalidRuleError { index, reason } => {
                format!("Rule #{} of the rule chain is not usable: {}", index, reason)
            }
            NumeralError::VariantMismatch { input, left, right, .. } => format!(
                "The {} and {} converters produced different numerals for {}",
                left, right, input
            ),
            NumeralError::IoError(e) => format!("Could not read or write a file: {}", e),
            NumeralError::SerializationError(e) => format!("Could not encode the report: {}", e),
            NumeralError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            NumeralError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid value for '{}': {}", value, field, reason)
            }
            NumeralError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            NumeralError::InvalidInput { .. } => "Pass a number that is zero or greater",
            NumeralError::InputTooLarge { .. } => "Pass a smaller number",
            NumeralError::InvalidRuleError { .. } => {
                "Each rule must collapse a run of the previous rule's symbol into one new symbol"
            }
            NumeralError::VariantMismatch { .. } => {
                "Run `numerals suite --verbose` to see which cases diverge"
            }
            NumeralError::IoError(_) => "Check that the file exists and is readable",
            NumeralError::SerializationError(_) => "Retry without --json",
            NumeralError::ConfigValidationError { .. }
            | NumeralError::InvalidConfigValueError { .. }
            | NumeralError::MissingConfigError { .. } => {
                "Fix the configuration file and try again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, NumeralError>;
