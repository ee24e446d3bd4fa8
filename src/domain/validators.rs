//! Pure field validators.
//!
//! Each check is stateless and side-effect free; the caller decides whether
//! a failure aborts an operation (add/edit) or is merely logged (bulk load).

use super::{BirthDate, ContactName, EmailAddress, PhoneNumber, ValidationError};

/// Exactly one '@', non-empty local and domain parts, dotted domain.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    EmailAddress::new(email).map(|_| ())
}

/// `(DDD) DDD-DDDD` or `DDD-DDD-DDDD`.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    PhoneNumber::new(phone).map(|_| ())
}

/// Absent is fine; present must be an ISO `YYYY-MM-DD` calendar date.
pub fn validate_date_of_birth(date_of_birth: Option<&str>) -> Result<(), ValidationError> {
    match date_of_birth {
        Some(text) => BirthDate::parse(text).map(|_| ()),
        None => Ok(()),
    }
}

/// Rejects empty and whitespace-only names.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    ContactName::new(name).map(|_| ())
}
