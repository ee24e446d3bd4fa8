use crate::error::StorageResult;
use crate::models::Contact;
use crate::storage::LoadReport;

/// Repository for persisting the contact collection.
///
/// The directory keeps everything in memory and hands the full collection
/// to `save` after each mutation, so implementations only need whole-set
/// load and replace.
pub trait ContactRepository: Send + Sync {
    /// Load every stored contact. Never fails; problems are reported in the
    /// returned warnings.
    fn load(&self) -> LoadReport;

    /// Replace the stored collection with `contacts`.
    fn save(&self, contacts: &[Contact]) -> StorageResult<()>;

    /// Human-readable location of the store, for log and status lines.
    fn location(&self) -> String;
}
