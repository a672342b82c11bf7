//! Numeric answers shared by `plan` flags and `session` prompts.

use minddoer_core::{validate_minutes, ValidationError, MAX_AVAILABLE_HOURS};

/// Hours available today, 0 to 24. Fractions are dropped.
pub fn parse_hours(answer: &str) -> Result<u32, ValidationError> {
    let hours: f64 = answer.trim().parse().map_err(|_| invalid("hours", answer))?;
    if !(0.0..=f64::from(MAX_AVAILABLE_HOURS)).contains(&hours) {
        return Err(ValidationError::InvalidValue {
            field: "hours".to_string(),
            message: format!("must be between 0 and {MAX_AVAILABLE_HOURS}, got {answer}"),
        });
    }
    Ok(hours.trunc() as u32)
}

/// A positive whole number of minutes.
pub fn parse_minutes(answer: &str) -> Result<u32, ValidationError> {
    let minutes: u32 = answer
        .trim()
        .parse()
        .map_err(|_| invalid("estimated_minutes", answer))?;
    validate_minutes(minutes)
}

fn invalid(field: &str, answer: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message: format!("'{answer}' is not a number"),
    }
}
