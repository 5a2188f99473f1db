use crate::error::{AppError, AppResult};
use regex::Regex;

/// Validates a service contact number: 7 to 15 digits, optional leading `+`.
pub fn validate_service_phone(phone: &str) -> AppResult<()> {
    let phone_regex =
        Regex::new(r"^\+?\d{7,15}$").map_err(|e| AppError::InternalError(e.to_string()))?;

    if !phone_regex.is_match(phone) {
        return Err(AppError::ValidationError(
            "Phone number must be 7-15 digits, optionally prefixed with +".to_string(),
        ));
    }

    Ok(())
}

/// Strips spaces, dashes, dots and parentheses, keeping a leading `+`.
pub fn normalize_phone(phone: &str) -> String {
    let trimmed = phone.trim();
    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();

    if trimmed.starts_with('+') {
        format!("+{digits}")
    } else {
        digits
    }
}
