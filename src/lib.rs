//! Digital Rolodex - a personal contact manager backed by a local JSON file.
//!
//! Contacts (name, address, phone, email, date of birth) are kept in memory
//! by a [`Rolodex`] directory that validates every add and edit, enforces
//! unique email addresses, and rewrites the backing file atomically after
//! each change.
//!
//! # Architecture
//!
//! - **domain**: Validated value objects and pure field validators
//! - **models**: The contact record, its lenient on-disk form, and edits
//! - **storage**: Tolerant JSON loading and atomic saving
//! - **repositories**: Persistence seam used by the directory
//! - **services**: The Rolodex directory, search/sort options, birthdays
//! - **config**: Configuration from environment variables
//! - **cli**: Interactive numbered menu
//!
//! # Example
//!
//! ```no_run
//! use rolodex::{Contact, Rolodex};
//!
//! let mut rolodex = Rolodex::open_file("contacts.json");
//! rolodex.add_contact(Contact::new("Ana Li", "ana@x.com")).unwrap();
//! assert_eq!(rolodex.search_contacts("ana").len(), 1);
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;
pub mod storage;

pub use config::Config;
pub use domain::ValidationError;
pub use error::{ConfigError, RolodexError, RolodexResult, StorageError, StorageResult};
pub use models::{Contact, ContactRecord, ContactUpdate};
pub use repositories::{ContactRepository, JsonFileRepository};
pub use services::{
    Rolodex, SearchField, SearchMode, SearchOptions, SortKey, SortOrder, UpcomingBirthday,
};
pub use storage::{load_contacts, load_contacts_with, save_contacts, LoadPolicy, LoadReport};
