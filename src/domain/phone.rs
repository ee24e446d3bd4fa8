//! PhoneNumber value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// `(DDD) DDD-DDDD` or `DDD-DDD-DDDD`, nothing else.
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\(\d{3}\) \d{3}-\d{4}|\d{3}-\d{3}-\d{4})$")
        .expect("Failed to compile phone number regex")
});

/// A type-safe wrapper for phone numbers.
///
/// Exactly two shapes are accepted: `(555) 123-4567` and `555-123-4567`.
/// Other separators, country prefixes, or digit counts are rejected.
///
/// # Example
///
/// ```
/// use rolodex::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("(555) 123-4567").unwrap();
/// assert_eq!(phone.digits_only(), "5551234567");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber, validating the format.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` if the phone format is invalid.
    pub fn new(phone: impl Into<String>) -> Result<Self, ValidationError> {
        let phone = phone.into();

        if !PHONE_REGEX.is_match(&phone) {
            return Err(ValidationError::InvalidPhone(phone));
        }

        Ok(Self(phone))
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Get the phone number with only digits (no formatting).
    pub fn digits_only(&self) -> String {
        self.0.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_accepts_both_shapes() {
        assert!(PhoneNumber::new("(555) 123-4567").is_ok());
        assert!(PhoneNumber::new("555-123-4567").is_ok());
    }

    #[test]
    fn test_phone_rejects_other_shapes() {
        assert!(PhoneNumber::new("").is_err());
        assert!(PhoneNumber::new("555.123.4567").is_err());
        assert!(PhoneNumber::new("5551234567").is_err());
        assert!(PhoneNumber::new("+1 555 867-5309").is_err());
        assert!(PhoneNumber::new("(555)123-4567").is_err());
        assert!(PhoneNumber::new("555-123-456").is_err());
        assert!(PhoneNumber::new("555-123-45678").is_err());
        assert!(PhoneNumber::new("abc-def-ghij").is_err());
        assert!(PhoneNumber::new(" 555-123-4567").is_err());
    }

    #[test]
    fn test_phone_digits_only() {
        let phone = PhoneNumber::new("(555) 123-4567").unwrap();
        assert_eq!(phone.digits_only(), "5551234567");
    }

    #[test]
    fn test_phone_serialization() {
        let phone = PhoneNumber::new("555-123-4567").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"555-123-4567\"");
    }
}
