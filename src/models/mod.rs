//! Data models for the Digital Rolodex.
//!
//! This module contains the contact record, its lenient on-disk form, and
//! the field-by-field update used by edits.

pub mod contact;

pub use contact::{Contact, ContactRecord, ContactUpdate};
