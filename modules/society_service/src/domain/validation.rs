//! Validation utilities for submitted forms

use crate::contract::SocietyError;

/// Minimum password length accepted at sign-up
pub const MIN_PASSWORD_LEN: usize = 8;

/// Largest single payment accepted, in cents
pub const MAX_AMOUNT_CENTS: i64 = 10_000_000_000_000;

/// Collect every blank required field
///
/// Fields are reported in the order given, so callers see them in form order.
pub fn require_fields(fields: &[(&str, &str)]) -> Result<(), SocietyError> {
    let missing: Vec<String> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| (*name).to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SocietyError::MissingFields { fields: missing })
    }
}

/// Validate an email address
///
/// Accepts `local@domain.tld`: exactly one '@', non-empty local part and a
/// domain with at least one inner dot.
pub fn validate_email(email: &str) -> Result<(), SocietyError> {
    let email = email.trim();
    let invalid = || SocietyError::validation(format!("'{}' is not a valid email address", email));

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || email.contains(char::is_whitespace) {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    Ok(())
}

/// Validate a postal index number (6 ASCII digits)
pub fn validate_pincode(pincode: &str) -> Result<(), SocietyError> {
    let pincode = pincode.trim();
    if pincode.len() == 6 && pincode.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(SocietyError::validation(format!(
            "pincode '{}' must be exactly 6 digits",
            pincode
        )))
    }
}

/// Validate a phone number
///
/// Spaces and dashes are ignored; an optional leading '+' is allowed and the
/// remaining 7 to 15 characters must be digits.
pub fn validate_phone(phone: &str) -> Result<(), SocietyError> {
    let compact: String = phone
        .trim()
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);

    if (7..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(SocietyError::validation(format!(
            "phone '{}' must contain 7 to 15 digits",
            phone
        )))
    }
}

pub fn validate_password(password: &str) -> Result<(), SocietyError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SocietyError::validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

pub fn validate_amount(amount_cents: i64) -> Result<(), SocietyError> {
    if amount_cents <= 0 {
        return Err(SocietyError::validation("amount must be greater than zero"));
    }
    if amount_cents > MAX_AMOUNT_CENTS {
        return Err(SocietyError::validation(format!(
            "amount must not exceed {MAX_AMOUNT_CENTS} cents"
        )));
    }
    Ok(())
}

pub fn validate_total_units(total_units: u32) -> Result<(), SocietyError> {
    if total_units == 0 {
        return Err(SocietyError::validation("total_units must be at least 1"));
    }
    Ok(())
}

/// Validate an uploaded file name
///
/// Names become part of download headers, so path separators, parent
/// references and control characters are rejected.
pub fn validate_file_name(file_name: &str) -> Result<(), SocietyError> {
    let name = file_name.trim();
    if name.is_empty() {
        return Err(SocietyError::MissingFields {
            fields: vec!["file_name".to_string()],
        });
    }

    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(SocietyError::validation(format!(
            "file name '{}' must not contain path separators",
            name
        )));
    }

    if name.chars().any(char::is_control) {
        return Err(SocietyError::validation(format!(
            "file name '{}' contains control characters",
            name.escape_debug()
        )));
    }

    Ok(())
}

/// Check that a post-login redirect target stays on this site
pub fn is_local_redirect(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.contains('\\')
}
