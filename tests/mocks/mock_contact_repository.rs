use rolodex::error::{StorageError, StorageResult};
use rolodex::models::Contact;
use rolodex::repositories::ContactRepository;
use rolodex::storage::{LoadReport, LoadWarning};
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Provides an in-memory implementation of ContactRepository that can be
/// seeded with contacts and load warnings, made to fail on save, and tracks
/// method calls for verification.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<Vec<Contact>>>,
    warnings: Arc<Mutex<Vec<LoadWarning>>>,
    fail_saves: Arc<Mutex<bool>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(Vec::new())),
            warnings: Arc::new(Mutex::new(Vec::new())),
            fail_saves: Arc::new(Mutex::new(false)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Create a repository already holding `contacts`.
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        let repo = Self::new();
        *repo.contacts.lock().unwrap() = contacts;
        repo
    }

    /// Add a warning that `load` will report.
    pub fn add_warning(&self, warning: LoadWarning) {
        self.warnings.lock().unwrap().push(warning);
    }

    /// Make every following `save` fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        *self.fail_saves.lock().unwrap() = fail;
    }

    /// What the last successful save stored.
    pub fn stored(&self) -> Vec<Contact> {
        self.contacts.lock().unwrap().clone()
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Reset all call counts.
    pub fn reset_call_counts(&self) {
        let mut counts = self.call_counts.lock().unwrap();
        counts.clear();
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactRepository for MockContactRepository {
    fn load(&self) -> LoadReport {
        self.track_call("load");

        LoadReport {
            contacts: self.contacts.lock().unwrap().clone(),
            warnings: self.warnings.lock().unwrap().clone(),
        }
    }

    fn save(&self, contacts: &[Contact]) -> StorageResult<()> {
        self.track_call("save");

        if *self.fail_saves.lock().unwrap() {
            return Err(StorageError::Persist {
                path: "mock://contacts".into(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "disk is read-only"),
            });
        }

        *self.contacts.lock().unwrap() = contacts.to_vec();
        Ok(())
    }

    fn location(&self) -> String {
        "mock://contacts".to_string()
    }
}
