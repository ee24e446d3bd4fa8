//! Domain validation errors.

use std::fmt;

/// Errors that can occur during contact field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The contact name is missing, empty, or whitespace-only.
    EmptyName,

    /// An email address is required but was not provided.
    MissingEmail,

    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The provided phone number does not match an accepted shape.
    InvalidPhone(String),

    /// The provided date of birth is not a valid `YYYY-MM-DD` calendar date.
    InvalidBirthDate(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name cannot be empty"),
            Self::MissingEmail => write!(f, "Email is required"),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::InvalidPhone(phone) => write!(
                f,
                "Invalid phone number: {} (expected (DDD) DDD-DDDD or DDD-DDD-DDDD)",
                phone
            ),
            Self::InvalidBirthDate(date) => {
                write!(f, "Invalid date of birth: {} (expected YYYY-MM-DD)", date)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
