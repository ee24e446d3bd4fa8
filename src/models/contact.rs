//! Contact model representing a person in the Rolodex.

use crate::domain::{BirthDate, ContactName, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A contact as it appears on disk, before any validation.
///
/// Every field is optional so a loosely-shaped record can still be decoded;
/// [`Contact::from_record`] decides whether it is usable. Older files wrote
/// `phone_num` and `birth_date`, which are accepted as aliases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ContactRecord {
    pub name: Option<String>,

    pub address: Option<String>,

    #[serde(alias = "phone_num")]
    pub phone: Option<String>,

    pub email: Option<String>,

    #[serde(alias = "birth_date")]
    pub date_of_birth: Option<String>,
}

/// A contact in the Rolodex.
///
/// `name` is always non-empty. The other fields are stored as entered;
/// format checks happen when the directory adds or edits a contact, so a
/// contact loaded from an older file may carry an imperfect phone number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "ContactRecord")]
pub struct Contact {
    /// Full name of the contact
    pub name: String,

    /// Postal address, free text
    pub address: Option<String>,

    /// Phone number, `(DDD) DDD-DDDD` or `DDD-DDD-DDDD` when added through the directory
    pub phone: Option<String>,

    /// Email address, unique within a Rolodex (case-insensitive)
    pub email: Option<String>,

    /// Date of birth as ISO `YYYY-MM-DD`
    pub date_of_birth: Option<String>,
}

impl Contact {
    /// Create a new contact with the two fields needed for minimal completeness.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            phone: None,
            email: Some(email.into()),
            date_of_birth: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_date_of_birth(mut self, date_of_birth: impl Into<String>) -> Self {
        self.date_of_birth = Some(date_of_birth.into());
        self
    }

    /// Build a contact from a loosely-shaped record.
    ///
    /// Only `name` is required; blank optional fields become `None`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` if the name is missing or blank.
    pub fn from_record(record: ContactRecord) -> Result<Self, ValidationError> {
        let name = ContactName::new(record.name.unwrap_or_default())?;

        Ok(Self {
            name: name.into_inner(),
            address: non_blank(record.address),
            phone: non_blank(record.phone),
            email: non_blank(record.email),
            date_of_birth: non_blank(record.date_of_birth),
        })
    }

    /// True iff both name and email are present and non-empty.
    pub fn is_minimally_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && self
                .email
                .as_deref()
                .is_some_and(|email| !email.trim().is_empty())
    }

    /// The stored date of birth, if present and parseable.
    pub fn birth_date(&self) -> Option<BirthDate> {
        self.date_of_birth
            .as_deref()
            .and_then(|text| BirthDate::parse(text).ok())
    }

    /// Case-insensitive comparison of the stored email against `email`.
    pub fn has_email(&self, email: &str) -> bool {
        let wanted = email.trim().to_lowercase();
        self.email
            .as_deref()
            .is_some_and(|own| own.trim().to_lowercase() == wanted)
    }

    /// Case-insensitive exact comparison of the stored name against `name`.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    /// One-line summary used by list and search output.
    pub fn summary(&self) -> String {
        format!(
            "{} <{}> | {} | {}",
            self.name,
            self.email.as_deref().unwrap_or(""),
            self.phone.as_deref().unwrap_or(""),
            self.address.as_deref().unwrap_or("")
        )
    }
}

impl TryFrom<ContactRecord> for Contact {
    type Error = ValidationError;

    fn try_from(record: ContactRecord) -> Result<Self, Self::Error> {
        Contact::from_record(record)
    }
}

impl From<Contact> for ContactRecord {
    fn from(contact: Contact) -> Self {
        Self {
            name: Some(contact.name),
            address: contact.address,
            phone: contact.phone,
            email: contact.email,
            date_of_birth: contact.date_of_birth,
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Address: {}", self.address.as_deref().unwrap_or(""))?;
        writeln!(f, "Phone: {}", self.phone.as_deref().unwrap_or(""))?;
        writeln!(f, "Email: {}", self.email.as_deref().unwrap_or(""))?;
        write!(
            f,
            "Date of Birth: {}",
            self.date_of_birth.as_deref().unwrap_or("")
        )
    }
}

/// Field-by-field changes applied by an edit.
///
/// `None` leaves a field untouched. A blank `address`, `phone` or
/// `date_of_birth` clears that field; a blank `name` or `email` is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<String>,
}

impl ContactUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn date_of_birth(mut self, date_of_birth: impl Into<String>) -> Self {
        self.date_of_birth = Some(date_of_birth.into());
        self
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
