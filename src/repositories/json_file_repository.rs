use crate::error::StorageResult;
use crate::models::Contact;
use crate::repositories::traits::ContactRepository;
use crate::storage::{self, LoadPolicy, LoadReport};
use std::path::PathBuf;

/// Contact repository backed by a single JSON file.
///
/// Delegates to the free functions in [`crate::storage`], which handle
/// tolerant loading and atomic replacement.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
    policy: LoadPolicy,
}

impl JsonFileRepository {
    /// Create a repository for `path` using the lenient load policy.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            policy: LoadPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl ContactRepository for JsonFileRepository {
    fn load(&self) -> LoadReport {
        storage::load_contacts_with(&self.path, self.policy)
    }

    fn save(&self, contacts: &[Contact]) -> StorageResult<()> {
        storage::save_contacts(&self.path, contacts)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("contacts.json"));
        let contacts = vec![Contact::new("Grace Hopper", "grace.hopper@nvlabs.mil")];

        repo.save(&contacts).unwrap();
        let report = repo.load();
        assert_eq!(report.contacts, contacts);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_repository_policy_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        std::fs::write(&path, r#"[{"name": "No Email"}]"#).unwrap();

        let lenient = JsonFileRepository::new(&path);
        assert_eq!(lenient.load().contacts.len(), 1);

        let strict = JsonFileRepository::new(&path).with_policy(LoadPolicy::RequireEmail);
        assert!(strict.load().contacts.is_empty());
        assert!(strict.location().ends_with("contacts.json"));
    }
}
