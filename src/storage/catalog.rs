//! Service catalog repository
//!
//! Caches the backend's hourly-based service ids and service types in
//! `data/services.json` so the rules can run without the network.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{QuokkaError, QuokkaResult};
use crate::models::{ServiceCatalog, ServiceId, ServiceType};

use super::file_io::{read_json, read_json_required, write_json_atomic};

/// Repository for the cached service catalog
pub struct CatalogRepository {
    path: PathBuf,
    data: RwLock<ServiceCatalog>,
}

impl CatalogRepository {
    /// Create a new catalog repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(ServiceCatalog::default()),
        }
    }

    /// Load the catalog from disk
    pub fn load(&self) -> QuokkaResult<()> {
        let catalog: ServiceCatalog = read_json(&self.path)?;
        *self.write_lock()? = catalog;
        Ok(())
    }

    /// Save the catalog to disk
    pub fn save(&self) -> QuokkaResult<()> {
        let data = self
            .data
            .read()
            .map_err(|e| QuokkaError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        write_json_atomic(&self.path, &*data)
    }

    /// Get a copy of the current catalog
    pub fn snapshot(&self) -> QuokkaResult<ServiceCatalog> {
        let data = self
            .data
            .read()
            .map_err(|e| QuokkaError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.clone())
    }

    /// Replace the catalog with one read from a file in the backend's shape
    pub fn import(&self, source: &Path) -> QuokkaResult<ServiceCatalog> {
        let catalog: ServiceCatalog = read_json_required(source)?;
        *self.write_lock()? = catalog.clone();
        Ok(catalog)
    }

    pub fn set_hourly_based_ids(&self, ids: Vec<ServiceId>) -> QuokkaResult<()> {
        self.write_lock()?.set_hourly_based_ids(ids);
        Ok(())
    }

    pub fn set_service_type(&self, id: ServiceId, service_type: ServiceType) -> QuokkaResult<()> {
        self.write_lock()?.set_service_type(id, service_type);
        Ok(())
    }

    fn write_lock(&self) -> QuokkaResult<std::sync::RwLockWriteGuard<'_, ServiceCatalog>> {
        self.data
            .write()
            .map_err(|e| QuokkaError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}
