//! Application service layer.
//!
//! The [`Rolodex`] directory holds the business rules (validation, email
//! uniqueness, persistence after each change). Search/sort options and
//! birthday reminders live beside it.

mod birthdays;
mod query;
mod rolodex;

pub use birthdays::{upcoming_birthdays, UpcomingBirthday};
pub use query::{SearchField, SearchMode, SearchOptions, SortKey, SortOrder};
pub use rolodex::Rolodex;
