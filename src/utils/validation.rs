use crate::utils::error::{MonopolyError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_amount(field_name: &str, value: i64) -> Result<()> {
    if value <= 0 {
        return Err(MonopolyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Amount must be positive".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_negative_amount(field_name: &str, value: i64) -> Result<()> {
    if value < 0 {
        return Err(MonopolyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Amount cannot be negative".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(MonopolyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MonopolyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_amount() {
        assert!(validate_positive_amount("go_salary", 200).is_ok());
        assert!(validate_positive_amount("go_salary", 0).is_err());
        assert!(validate_positive_amount("go_salary", -50).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("doubles_limit", 3u8, 1, 5).is_ok());
        assert!(validate_range("doubles_limit", 0u8, 1, 5).is_err());
        assert!(validate_range("doubles_limit", 9u8, 1, 5).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("name", "Boardwalk").is_ok());
        assert!(validate_non_empty_string("name", "   ").is_err());
    }
}
