//! Flat-file persistence for contacts.
//!
//! Contacts are stored as a pretty-printed UTF-8 JSON array. Loading is
//! tolerant: a missing file is an empty Rolodex, a corrupt file is logged and
//! treated as empty, and a malformed item is skipped without failing the
//! rest. Saving goes through a temporary file in the target directory that
//! is renamed over the target, so readers only ever see a complete file.

use crate::error::{StorageError, StorageResult};
use crate::models::{Contact, ContactRecord};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// How strictly loaded records are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Only a name is required; records without an email are kept with a warning.
    #[default]
    Lenient,

    /// Records that are not minimally complete (name and email) are skipped.
    RequireEmail,
}

/// What went wrong with part of a contacts file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadWarningKind {
    /// The whole file could not be read or parsed; nothing was loaded.
    Unreadable,

    /// One record was skipped.
    Skipped,

    /// One record was kept but is not minimally complete.
    Incomplete,
}

/// A problem noticed while loading, already logged at warn level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    pub kind: LoadWarningKind,

    /// Position of the record in the file, `None` for file-level problems
    pub index: Option<usize>,

    pub reason: String,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "record #{}: {}", index, self.reason),
            None => write!(f, "{}", self.reason),
        }
    }
}

/// Result of loading a contacts file.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub contacts: Vec<Contact>,
    pub warnings: Vec<LoadWarning>,
}

impl LoadReport {
    /// Number of records that were dropped.
    pub fn skipped(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| w.kind == LoadWarningKind::Skipped)
            .count()
    }

    fn unreadable(&mut self, path: &Path, reason: String) {
        warn!(path = %path.display(), "Could not load contacts: {}; starting empty", reason);
        self.warnings.push(LoadWarning {
            kind: LoadWarningKind::Unreadable,
            index: None,
            reason,
        });
    }

    fn record(&mut self, kind: LoadWarningKind, index: usize, reason: String) {
        match kind {
            LoadWarningKind::Incomplete => {
                warn!(index, "Loaded incomplete contact: {}", reason)
            }
            _ => warn!(index, "Skipping contact record: {}", reason),
        }
        self.warnings.push(LoadWarning {
            kind,
            index: Some(index),
            reason,
        });
    }
}

/// Load contacts from `path` with the lenient policy.
///
/// Never fails: problems are logged and the usable records returned.
pub fn load_contacts(path: impl AsRef<Path>) -> Vec<Contact> {
    load_contacts_with(path, LoadPolicy::default()).contacts
}

/// Load contacts from `path`, reporting every skipped or suspicious record.
pub fn load_contacts_with(path: impl AsRef<Path>, policy: LoadPolicy) -> LoadReport {
    let path = path.as_ref();
    let mut report = LoadReport::default();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No contacts file yet");
            return report;
        }
        Err(e) => {
            report.unreadable(path, format!("read failed: {}", e));
            return report;
        }
    };

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(_) => {
            report.unreadable(path, "file is not valid UTF-8".to_string());
            return report;
        }
    };

    let items = match serde_json::from_str::<Value>(&text) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            report.unreadable(path, "expected a JSON array of contacts".to_string());
            return report;
        }
        Err(e) => {
            report.unreadable(path, format!("invalid JSON: {}", e));
            return report;
        }
    };

    let total = items.len();
    for (index, item) in items.into_iter().enumerate() {
        let record = match serde_json::from_value::<ContactRecord>(item) {
            Ok(record) => record,
            Err(e) => {
                report.record(LoadWarningKind::Skipped, index, format!("malformed: {}", e));
                continue;
            }
        };

        let contact = match Contact::from_record(record) {
            Ok(contact) => contact,
            Err(e) => {
                report.record(LoadWarningKind::Skipped, index, e.to_string());
                continue;
            }
        };

        if !contact.is_minimally_complete() {
            let reason = format!("'{}' has no email", contact.name);
            match policy {
                LoadPolicy::RequireEmail => {
                    report.record(LoadWarningKind::Skipped, index, reason);
                    continue;
                }
                LoadPolicy::Lenient => report.record(LoadWarningKind::Incomplete, index, reason),
            }
        }

        report.contacts.push(contact);
    }

    debug!(
        path = %path.display(),
        loaded = report.contacts.len(),
        total,
        "Loaded contacts"
    );
    report
}

/// Save the full collection to `path`, replacing it atomically.
///
/// Parent directories are created as needed. The data is written and synced
/// to a temporary file beside `path` which is then renamed over it; the
/// temporary file is removed if anything fails. An existing file keeps its
/// permissions.
pub fn save_contacts(path: impl AsRef<Path>, contacts: &[Contact]) -> StorageResult<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;

    let mut content = serde_json::to_string_pretty(contacts)?;
    content.push('\n');

    let mut tmp = tempfile::Builder::new()
        .prefix(".contacts-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| StorageError::io(dir, e))?;

    let tmp_path = tmp.path().to_path_buf();

    // Replacing a file keeps its mode; temp files start out owner-only
    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| StorageError::io(&tmp_path, e))?;
    }

    tmp.write_all(content.as_bytes())
        .map_err(|e| StorageError::io(&tmp_path, e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| StorageError::io(&tmp_path, e))?;

    tmp.persist(path).map_err(|e| StorageError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    info!(path = %path.display(), count = contacts.len(), "Saved contacts");
    Ok(())
}
