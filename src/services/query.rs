//! Search and sort options for listing contacts.

use crate::domain::email::normalize_email;
use crate::models::Contact;
use std::cmp::Ordering;
use std::str::FromStr;

/// A contact field that search can look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Name,
    Email,
    Address,
    Phone,
    DateOfBirth,
}

impl SearchField {
    /// Every searchable field, in display order.
    pub const ALL: [SearchField; 5] = [
        SearchField::Name,
        SearchField::Email,
        SearchField::Address,
        SearchField::Phone,
        SearchField::DateOfBirth,
    ];

    fn value<'a>(&self, contact: &'a Contact) -> Option<&'a str> {
        match self {
            SearchField::Name => Some(contact.name.as_str()),
            SearchField::Email => contact.email.as_deref(),
            SearchField::Address => contact.address.as_deref(),
            SearchField::Phone => contact.phone.as_deref(),
            SearchField::DateOfBirth => contact.date_of_birth.as_deref(),
        }
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SearchField::Name),
            "email" => Ok(SearchField::Email),
            "address" => Ok(SearchField::Address),
            "phone" | "phone_num" => Ok(SearchField::Phone),
            "date_of_birth" | "birth_date" | "dob" => Ok(SearchField::DateOfBirth),
            other => Err(format!(
                "unknown search field '{}' (expected name, email, address, phone, date_of_birth)",
                other
            )),
        }
    }
}

/// How a query is compared against field values. Both modes ignore case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// The query appears anywhere in the field
    #[default]
    Substring,

    /// The whole field equals the query
    Exact,
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substring" | "partial" => Ok(SearchMode::Substring),
            "exact" => Ok(SearchMode::Exact),
            other => Err(format!(
                "unknown search mode '{}' (expected substring or exact)",
                other
            )),
        }
    }
}

/// Which fields to search and how to compare them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub fields: Vec<SearchField>,
    pub mode: SearchMode,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            fields: SearchField::ALL.to_vec(),
            mode: SearchMode::Substring,
        }
    }
}

impl SearchOptions {
    /// Restrict the search to `fields`.
    pub fn in_fields(mut self, fields: &[SearchField]) -> Self {
        self.fields = fields.to_vec();
        self
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Whether `contact` matches an already-normalized query.
    pub(crate) fn matches(&self, normalized_query: &str, contact: &Contact) -> bool {
        self.fields.iter().any(|field| {
            field.value(contact).is_some_and(|value| {
                let value = value.to_lowercase();
                match self.mode {
                    SearchMode::Substring => value.contains(normalized_query),
                    SearchMode::Exact => value.trim() == normalized_query,
                }
            })
        })
    }
}

/// Normalize a search query: trimmed and lowercased.
pub(crate) fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Field used to order a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Alphabetical, ignoring case
    Name,

    /// Alphabetical, ignoring case
    Email,

    /// Chronological, oldest first
    DateOfBirth,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "email" => Ok(SortKey::Email),
            "date_of_birth" | "birth_date" | "dob" => Ok(SortKey::DateOfBirth),
            other => Err(format!(
                "sort key must be one of name, email, birth_date (got '{}')",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Sort in place. Contacts lacking the key always come last, and ties keep
/// their current relative order.
pub(crate) fn sort_contacts(contacts: &mut [&Contact], key: SortKey, order: SortOrder) {
    contacts.sort_by(|a, b| compare(a, b, key, order));
}

fn compare(a: &Contact, b: &Contact, key: SortKey, order: SortOrder) -> Ordering {
    match key {
        SortKey::Name => compare_present(
            Some(a.name.to_lowercase()),
            Some(b.name.to_lowercase()),
            order,
        ),
        SortKey::Email => compare_present(
            a.email.as_deref().map(normalize_email),
            b.email.as_deref().map(normalize_email),
            order,
        ),
        SortKey::DateOfBirth => compare_present(a.birth_date(), b.birth_date(), order),
    }
}

fn compare_present<T: Ord>(a: Option<T>, b: Option<T>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Ascending => a.cmp(&b),
            SortOrder::Descending => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
