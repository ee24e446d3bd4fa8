//! Domain value objects and validators.
//!
//! Type-safe wrappers for the validated contact fields (names, email
//! addresses, phone numbers, birth dates) plus the pure validator functions
//! the directory runs on add and edit. None of these touch the filesystem
//! or the logger.

pub mod birth_date;
pub mod email;
pub mod errors;
pub mod name;
pub mod phone;
pub mod validators;

pub use birth_date::BirthDate;
pub use email::EmailAddress;
pub use errors::ValidationError;
pub use name::ContactName;
pub use phone::PhoneNumber;
pub use validators::{validate_date_of_birth, validate_email, validate_name, validate_phone};
