use crate::utils::error::{NumeralError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NumeralError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| NumeralError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(NumeralError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Returns the symbol a value is made of, if it is one symbol repeated.
pub fn validate_symbol_run(field_name: &str, value: &str) -> Result<char> {
    validate_non_empty_string(field_name, value)?;

    let mut chars = value.chars();
    let symbol = chars.next().ok_or_else(|| NumeralError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: "Value cannot be empty".to_string(),
    })?;

    if symbol.is_whitespace() || chars.any(|c| c != symbol) {
        return Err(NumeralError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must repeat a single non-whitespace symbol".to_string(),
        });
    }

    Ok(symbol)
}
