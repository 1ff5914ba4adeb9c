//! Storage layer for Quokka
//!
//! Local state is small: the cached service catalog, the settings file and
//! the append-only audit log. Records themselves belong to the backend.

pub mod catalog;
pub mod file_io;

pub use catalog::CatalogRepository;
pub use file_io::{read_json, read_json_required, write_json_atomic};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::QuokkaPaths;
use crate::error::QuokkaResult;

/// Main storage coordinator that provides access to the repositories and the audit log
pub struct Storage {
    paths: QuokkaPaths,
    pub catalog: CatalogRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: QuokkaPaths) -> QuokkaResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            catalog: CatalogRepository::new(paths.services_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &QuokkaPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> QuokkaResult<()> {
        self.catalog.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> QuokkaResult<()> {
        self.catalog.save()
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a prepared record (one entry per payload sent to the backend)
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        summary: Option<String>,
        entity: &T,
    ) -> QuokkaResult<()> {
        let entry = AuditEntry::create(entity_type, entity_id, summary, entity);
        self.audit.log(&entry)
    }

    /// Record a batch of prepared records, e.g. both legs of a return trip
    pub fn log_create_batch(&self, entries: Vec<AuditEntry>) -> QuokkaResult<()> {
        self.audit.log_batch(&entries)
    }

    /// Record a change to local state with a before/after diff
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        before: &T,
        after: &T,
    ) -> QuokkaResult<()> {
        let entry = AuditEntry::update(entity_type, entity_id, None, before, after);
        self.audit.log(&entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ServiceId, ServiceType};
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuokkaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_save_and_load_all() {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuokkaPaths::with_base_dir(temp_dir.path().to_path_buf());

        let storage = Storage::new(paths.clone()).unwrap();
        storage
            .catalog
            .set_service_type(ServiceId::new(3), ServiceType::Material)
            .unwrap();
        storage.save_all().unwrap();

        let mut reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        assert_eq!(
            reopened.catalog.snapshot().unwrap().service_type(ServiceId::new(3)),
            Some(ServiceType::Material)
        );
    }

    #[test]
    fn test_log_update_records_diff() {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuokkaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let before = serde_json::json!({"accounting_min_amount": 0.25});
        let after = serde_json::json!({"accounting_min_amount": 0.5});
        storage
            .log_update(EntityType::Settings, "settings", &before, &after)
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].changes.as_deref(),
            Some("accounting_min_amount: 0.25 -> 0.5")
        );
    }
}
