//! The Rolodex: an in-memory contact directory persisted after every change.
//!
//! All validation happens here, before anything is mutated. Uniqueness of
//! email addresses is enforced case-insensitively. After each successful
//! add, edit or delete the full collection is handed to the repository; if
//! that write fails the in-memory collection is restored and the storage
//! error is returned.

use crate::domain::email::normalize_email;
use crate::domain::{
    validate_date_of_birth, validate_phone, ContactName, EmailAddress, ValidationError,
};
use crate::error::{RolodexError, RolodexResult};
use crate::models::{Contact, ContactRecord, ContactUpdate};
use crate::repositories::{ContactRepository, JsonFileRepository};
use crate::services::birthdays::{self, UpcomingBirthday};
use crate::services::query::{self, SearchOptions, SortKey, SortOrder};
use crate::storage::{LoadWarning, LoadWarningKind};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

/// A contact directory backed by a [`ContactRepository`].
pub struct Rolodex {
    contacts: Vec<Contact>,
    repository: Arc<dyn ContactRepository>,
    load_warnings: Vec<LoadWarning>,
}

impl Rolodex {
    /// Create an empty directory without reading the repository.
    ///
    /// The first mutation will overwrite whatever the repository holds.
    pub fn empty(repository: Arc<dyn ContactRepository>) -> Self {
        Self {
            contacts: Vec::new(),
            repository,
            load_warnings: Vec::new(),
        }
    }

    /// Create a directory hydrated from the repository.
    ///
    /// Records whose email repeats an earlier record's are dropped with a
    /// warning so the uniqueness invariant holds from the start.
    pub fn open(repository: Arc<dyn ContactRepository>) -> Self {
        let report = repository.load();
        let mut load_warnings = report.warnings;
        let mut seen = HashSet::new();
        let mut contacts = Vec::with_capacity(report.contacts.len());

        for (position, contact) in report.contacts.into_iter().enumerate() {
            if let Some(email) = contact.email.as_deref() {
                if !seen.insert(normalize_email(email)) {
                    let reason = format!("duplicate email '{}' for '{}'", email, contact.name);
                    warn!("Skipping loaded contact: {}", reason);
                    load_warnings.push(LoadWarning {
                        kind: LoadWarningKind::Skipped,
                        index: Some(position),
                        reason,
                    });
                    continue;
                }
            }
            contacts.push(contact);
        }

        info!(
            location = %repository.location(),
            count = contacts.len(),
            warnings = load_warnings.len(),
            "Opened rolodex"
        );

        Self {
            contacts,
            repository,
            load_warnings,
        }
    }

    /// Open a directory stored in a JSON file at `path`.
    pub fn open_file(path: impl Into<PathBuf>) -> Self {
        Self::open(Arc::new(JsonFileRepository::new(path)))
    }

    /// Warnings raised while hydrating; empty for [`Rolodex::empty`].
    pub fn load_warnings(&self) -> &[LoadWarning] {
        &self.load_warnings
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }

    pub fn location(&self) -> String {
        self.repository.location()
    }

    /// Persist the current collection.
    pub fn save(&self) -> RolodexResult<()> {
        self.repository.save(&self.contacts)?;
        Ok(())
    }

    /// Validate and add a contact, then persist.
    ///
    /// Name and email are trimmed; empty optional fields are dropped.
    ///
    /// # Errors
    ///
    /// - `Validation` if the name is blank, the email is missing or
    ///   malformed, or the phone or date of birth is malformed
    /// - `DuplicateEmail` if another contact already uses the email
    /// - `Storage` if the write fails (the contact is not kept)
    pub fn add_contact(&mut self, contact: Contact) -> RolodexResult<Contact> {
        let contact = Self::prepare_new(contact)?;
        let email = contact.email.clone().unwrap_or_default();

        if self.email_in_use(&email, &[]) {
            return Err(RolodexError::DuplicateEmail(email));
        }

        let snapshot = self.contacts.clone();
        self.contacts.push(contact.clone());
        self.commit(snapshot)?;

        info!("Added contact '{}' <{}>", contact.name, email);
        Ok(contact)
    }

    /// Add a contact from a loosely-shaped record.
    pub fn add_record(&mut self, record: ContactRecord) -> RolodexResult<Contact> {
        let contact = Contact::from_record(record)?;
        self.add_contact(contact)
    }

    /// Edit every contact whose name matches `name` (case-insensitive, exact).
    ///
    /// All changed fields are validated before any is applied.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no contact has that name
    /// - `Validation` for a malformed field
    /// - `DuplicateEmail` if the new email belongs to a different contact,
    ///   or if several contacts share the name and the email would change
    pub fn edit_contact(
        &mut self,
        name: &str,
        update: ContactUpdate,
    ) -> RolodexResult<Vec<Contact>> {
        let indices = self.positions_by_name(name);
        if indices.is_empty() {
            return Err(RolodexError::NotFound(name.trim().to_string()));
        }
        self.apply_update(&indices, update)
    }

    /// Edit the contact with the given email (case-insensitive).
    pub fn edit_by_email(&mut self, email: &str, update: ContactUpdate) -> RolodexResult<Contact> {
        let index = self
            .position_by_email(email)
            .ok_or_else(|| RolodexError::NotFound(email.trim().to_string()))?;
        let mut updated = self.apply_update(&[index], update)?;
        updated
            .pop()
            .ok_or_else(|| RolodexError::NotFound(email.trim().to_string()))
    }

    /// Delete every contact whose name matches `name`, then persist.
    ///
    /// Nothing is written when no contact matches.
    pub fn delete_contact(&mut self, name: &str) -> RolodexResult<Vec<Contact>> {
        let indices = self.positions_by_name(name);
        if indices.is_empty() {
            return Err(RolodexError::NotFound(name.trim().to_string()));
        }
        self.remove_at(&indices)
    }

    /// Delete the contact with the given email, then persist.
    pub fn delete_by_email(&mut self, email: &str) -> RolodexResult<Contact> {
        let index = self
            .position_by_email(email)
            .ok_or_else(|| RolodexError::NotFound(email.trim().to_string()))?;
        let mut removed = self.remove_at(&[index])?;
        removed
            .pop()
            .ok_or_else(|| RolodexError::NotFound(email.trim().to_string()))
    }

    /// Case-insensitive exact lookup by email.
    pub fn get_by_email(&self, email: &str) -> Option<&Contact> {
        self.position_by_email(email).map(|i| &self.contacts[i])
    }

    /// The first contact whose name matches `name` (case-insensitive, exact).
    pub fn view_contact(&self, name: &str) -> RolodexResult<&Contact> {
        self.contacts
            .iter()
            .find(|c| c.has_name(name))
            .ok_or_else(|| RolodexError::NotFound(name.trim().to_string()))
    }

    /// Case-insensitive substring search across every text field, in
    /// insertion order. A blank query matches nothing.
    pub fn search_contacts(&self, query: &str) -> Vec<&Contact> {
        self.search_with(query, &SearchOptions::default())
    }

    /// Search with explicit fields and match mode.
    pub fn search_with(&self, query: &str, options: &SearchOptions) -> Vec<&Contact> {
        let query = query::normalize_query(query);
        if query.is_empty() {
            return Vec::new();
        }
        self.contacts
            .iter()
            .filter(|c| options.matches(&query, c))
            .collect()
    }

    /// All contacts, in insertion order or ascending by `sort_key`.
    ///
    /// Contacts lacking the sort field come last.
    pub fn list_contacts(&self, sort_key: Option<SortKey>) -> Vec<&Contact> {
        match sort_key {
            Some(key) => self.list_sorted(key, SortOrder::Ascending),
            None => self.contacts.iter().collect(),
        }
    }

    /// All contacts sorted by `key` in `order`; contacts lacking the field
    /// stay last in either order.
    pub fn list_sorted(&self, key: SortKey, order: SortOrder) -> Vec<&Contact> {
        let mut contacts: Vec<&Contact> = self.contacts.iter().collect();
        query::sort_contacts(&mut contacts, key, order);
        contacts
    }

    /// Birthdays within `within_days` days of `today`, soonest first.
    pub fn upcoming_birthdays(
        &self,
        today: NaiveDate,
        within_days: u32,
    ) -> Vec<UpcomingBirthday<'_>> {
        birthdays::upcoming_birthdays(&self.contacts, today, within_days)
    }

    // ==================== Internals ====================

    fn positions_by_name(&self, name: &str) -> Vec<usize> {
        self.contacts
            .iter()
            .enumerate()
            .filter(|(_, c)| c.has_name(name))
            .map(|(i, _)| i)
            .collect()
    }

    fn position_by_email(&self, email: &str) -> Option<usize> {
        if email.trim().is_empty() {
            return None;
        }
        self.contacts.iter().position(|c| c.has_email(email))
    }

    /// Whether a contact outside `excluding` already uses `email`.
    fn email_in_use(&self, email: &str, excluding: &[usize]) -> bool {
        self.contacts
            .iter()
            .enumerate()
            .any(|(i, c)| !excluding.contains(&i) && c.has_email(email))
    }

    fn prepare_new(contact: Contact) -> Result<Contact, ValidationError> {
        let name = ContactName::new(&contact.name)?;
        let email = trimmed(contact.email).ok_or(ValidationError::MissingEmail)?;
        let email = EmailAddress::new(email)?;

        let phone = trimmed(contact.phone);
        if let Some(phone) = phone.as_deref() {
            validate_phone(phone)?;
        }

        let date_of_birth = trimmed(contact.date_of_birth);
        validate_date_of_birth(date_of_birth.as_deref())?;

        Ok(Contact {
            name: name.into_inner(),
            address: trimmed(contact.address),
            phone,
            email: Some(email.into_inner()),
            date_of_birth,
        })
    }

    fn apply_update(
        &mut self,
        indices: &[usize],
        update: ContactUpdate,
    ) -> RolodexResult<Vec<Contact>> {
        let changes = PreparedUpdate::validate(update)?;

        if let Some(email) = changes.email.as_deref() {
            let unchanged = indices.len() == 1 && self.contacts[indices[0]].has_email(email);
            if !unchanged && (indices.len() > 1 || self.email_in_use(email, indices)) {
                return Err(RolodexError::DuplicateEmail(email.to_string()));
            }
        }

        let snapshot = self.contacts.clone();
        for &i in indices {
            changes.apply_to(&mut self.contacts[i]);
        }
        self.commit(snapshot)?;

        let updated: Vec<Contact> = indices.iter().map(|&i| self.contacts[i].clone()).collect();
        for contact in &updated {
            info!(
                "Edited contact '{}' <{}>",
                contact.name,
                contact.email.as_deref().unwrap_or("")
            );
        }
        Ok(updated)
    }

    fn remove_at(&mut self, indices: &[usize]) -> RolodexResult<Vec<Contact>> {
        let snapshot = self.contacts.clone();
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.contacts)
            .into_iter()
            .enumerate()
            .partition(|(i, _)| indices.contains(i));

        self.contacts = kept.into_iter().map(|(_, c)| c).collect();
        self.commit(snapshot)?;

        let removed: Vec<Contact> = removed.into_iter().map(|(_, c)| c).collect();
        for contact in &removed {
            info!(
                "Deleted contact '{}' <{}>",
                contact.name,
                contact.email.as_deref().unwrap_or("")
            );
        }
        Ok(removed)
    }

    /// Persist, restoring `snapshot` if the write fails.
    fn commit(&mut self, snapshot: Vec<Contact>) -> RolodexResult<()> {
        if let Err(e) = self.repository.save(&self.contacts) {
            error!("Failed to save contacts to {}: {}", self.repository.location(), e);
            self.contacts = snapshot;
            return Err(e.into());
        }
        Ok(())
    }
}

/// A validated [`ContactUpdate`]. For optional fields the inner `None`
/// means "clear".
#[derive(Debug, Default)]
struct PreparedUpdate {
    name: Option<String>,
    address: Option<Option<String>>,
    phone: Option<Option<String>>,
    email: Option<String>,
    date_of_birth: Option<Option<String>>,
}

impl PreparedUpdate {
    fn validate(update: ContactUpdate) -> Result<Self, ValidationError> {
        let name = update
            .name
            .map(|name| ContactName::new(name).map(ContactName::into_inner))
            .transpose()?;

        let email = match update.email {
            Some(email) => {
                let email = email.trim();
                if email.is_empty() {
                    return Err(ValidationError::MissingEmail);
                }
                Some(EmailAddress::new(email)?.into_inner())
            }
            None => None,
        };

        let phone = update.phone.map(|p| trimmed(Some(p)));
        if let Some(Some(phone)) = phone.as_ref() {
            validate_phone(phone)?;
        }

        let date_of_birth = update.date_of_birth.map(|d| trimmed(Some(d)));
        if let Some(date_of_birth) = date_of_birth.as_ref() {
            validate_date_of_birth(date_of_birth.as_deref())?;
        }

        Ok(Self {
            name,
            address: update.address.map(|a| trimmed(Some(a))),
            phone,
            email,
            date_of_birth,
        })
    }

    fn apply_to(&self, contact: &mut Contact) {
        if let Some(name) = &self.name {
            contact.name = name.clone();
        }
        if let Some(address) = &self.address {
            contact.address = address.clone();
        }
        if let Some(phone) = &self.phone {
            contact.phone = phone.clone();
        }
        if let Some(email) = &self.email {
            contact.email = Some(email.clone());
        }
        if let Some(date_of_birth) = &self.date_of_birth {
            contact.date_of_birth = date_of_birth.clone();
        }
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageResult;
    use crate::storage::LoadReport;
    use std::sync::Mutex;

    /// Repository that keeps the last saved collection in memory.
    #[derive(Default)]
    struct MemoryRepository {
        saved: Mutex<Vec<Contact>>,
        fail: bool,
    }

    impl ContactRepository for MemoryRepository {
        fn load(&self) -> LoadReport {
            LoadReport {
                contacts: self.saved.lock().unwrap().clone(),
                warnings: Vec::new(),
            }
        }

        fn save(&self, contacts: &[Contact]) -> StorageResult<()> {
            if self.fail {
                return Err(crate::error::StorageError::io(
                    "memory",
                    std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                ));
            }
            *self.saved.lock().unwrap() = contacts.to_vec();
            Ok(())
        }

        fn location(&self) -> String {
            "memory".to_string()
        }
    }

    fn rolodex() -> Rolodex {
        Rolodex::empty(Arc::new(MemoryRepository::default()))
    }

    #[test]
    fn test_add_trims_and_validates() {
        let mut rx = rolodex();
        let added = rx
            .add_contact(Contact::new("  Ana Li ", " ana@x.com ").with_phone(" 555-123-4567 "))
            .unwrap();
        assert_eq!(added.name, "Ana Li");
        assert_eq!(added.email.as_deref(), Some("ana@x.com"));
        assert_eq!(added.phone.as_deref(), Some("555-123-4567"));
    }

    #[test]
    fn test_add_requires_email() {
        let mut rx = rolodex();
        let mut contact = Contact::new("Ana Li", "");
        contact.email = None;
        assert!(matches!(
            rx.add_contact(contact),
            Err(RolodexError::Validation(ValidationError::MissingEmail))
        ));
        assert!(rx.is_empty());
    }

    #[test]
    fn test_add_rejects_bad_phone_and_date() {
        let mut rx = rolodex();
        let bad_phone = Contact::new("Ana", "ana@x.com").with_phone("555 123 4567");
        assert!(matches!(
            rx.add_contact(bad_phone),
            Err(RolodexError::Validation(ValidationError::InvalidPhone(_)))
        ));

        let bad_date = Contact::new("Ana", "ana@x.com").with_date_of_birth("1990-13-01");
        assert!(matches!(
            rx.add_contact(bad_date),
            Err(RolodexError::Validation(ValidationError::InvalidBirthDate(_)))
        ));
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let repo = Arc::new(MemoryRepository {
            saved: Mutex::new(Vec::new()),
            fail: true,
        });
        let mut rx = Rolodex::empty(repo);
        let result = rx.add_contact(Contact::new("Ana", "ana@x.com"));
        assert!(matches!(result, Err(RolodexError::Storage(_))));
        assert!(rx.is_empty());
    }

    #[test]
    fn test_edit_clears_optional_fields() {
        let mut rx = rolodex();
        rx.add_contact(
            Contact::new("Ana", "ana@x.com")
                .with_address("Somewhere")
                .with_date_of_birth("1990-05-01"),
        )
        .unwrap();

        let updated = rx
            .edit_contact("ana", ContactUpdate::new().address("").date_of_birth(" "))
            .unwrap();
        assert!(updated[0].address.is_none());
        assert!(updated[0].date_of_birth.is_none());
    }

    #[test]
    fn test_edit_rejects_blank_name_without_changes() {
        let mut rx = rolodex();
        rx.add_contact(Contact::new("Ana", "ana@x.com")).unwrap();
        let result = rx.edit_contact("Ana", ContactUpdate::new().name("  ").address("New"));
        assert!(matches!(
            result,
            Err(RolodexError::Validation(ValidationError::EmptyName))
        ));
        assert!(rx.view_contact("Ana").unwrap().address.is_none());
    }

    #[test]
    fn test_edit_email_with_shared_name_is_rejected() {
        let mut rx = rolodex();
        rx.add_contact(Contact::new("Sam", "sam1@x.com")).unwrap();
        rx.add_contact(Contact::new("sam", "sam2@x.com")).unwrap();

        let result = rx.edit_contact("SAM", ContactUpdate::new().email("sam@x.com"));
        assert!(matches!(result, Err(RolodexError::DuplicateEmail(_))));

        let updated = rx
            .edit_contact("SAM", ContactUpdate::new().address("Shared St"))
            .unwrap();
        assert_eq!(updated.len(), 2);
    }

    #[test]
    fn test_open_drops_duplicate_emails() {
        let repo = Arc::new(MemoryRepository::default());
        repo.save(&[
            Contact::new("Ada", "ada@example.com"),
            Contact::new("Ada Clone", "ADA@example.com"),
        ])
        .unwrap();

        let rx = Rolodex::open(repo);
        assert_eq!(rx.len(), 1);
        assert_eq!(rx.load_warnings().len(), 1);
        assert_eq!(rx.load_warnings()[0].kind, LoadWarningKind::Skipped);
    }

    #[test]
    fn test_blank_lookups_find_nothing() {
        let mut rx = rolodex();
        rx.add_contact(Contact::new("Ana", "ana@x.com")).unwrap();
        assert!(rx.get_by_email("  ").is_none());
        assert!(rx.search_contacts("   ").is_empty());
    }
}
