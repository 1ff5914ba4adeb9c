//! Service catalog model
//!
//! The backend classifies every billable service twice: whether it is
//! hourly-based (quantity measured as elapsed time) and whether it is a
//! material or a wage service. Both lists are fetched from the services
//! catalog; this model keeps them together for the reconciliation rules.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use super::ids::ServiceId;

/// Classification of a billable service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    /// Fixed-unit service such as parts
    Material,
    /// Time-based service such as labour
    Wage,
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Material => write!(f, "material"),
            Self::Wage => write!(f, "wage"),
        }
    }
}

impl FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "material" => Ok(Self::Material),
            "wage" => Ok(Self::Wage),
            other => Err(format!(
                "Unknown service type '{}'. Use 'material' or 'wage'",
                other
            )),
        }
    }
}

/// One row of the backend's service type listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTypeEntry {
    pub id: ServiceId,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
}

/// Hourly-based ids and service types, as fetched from the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCatalog {
    #[serde(default)]
    hourly_based_ids: BTreeSet<ServiceId>,
    #[serde(default, with = "type_list")]
    types: BTreeMap<ServiceId, ServiceType>,
}

impl ServiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from the two catalog listings
    pub fn from_parts(
        hourly_based_ids: impl IntoIterator<Item = ServiceId>,
        types: impl IntoIterator<Item = ServiceTypeEntry>,
    ) -> Self {
        Self {
            hourly_based_ids: hourly_based_ids.into_iter().collect(),
            types: types
                .into_iter()
                .map(|entry| (entry.id, entry.service_type))
                .collect(),
        }
    }

    /// Check if a service's quantity is measured in elapsed time
    pub fn is_hourly_based(&self, id: ServiceId) -> bool {
        self.hourly_based_ids.contains(&id)
    }

    pub fn service_type(&self, id: ServiceId) -> Option<ServiceType> {
        self.types.get(&id).copied()
    }

    pub fn hourly_based_ids(&self) -> impl Iterator<Item = ServiceId> + '_ {
        self.hourly_based_ids.iter().copied()
    }

    pub fn type_entries(&self) -> Vec<ServiceTypeEntry> {
        self.types
            .iter()
            .map(|(id, service_type)| ServiceTypeEntry {
                id: *id,
                service_type: *service_type,
            })
            .collect()
    }

    /// Replace the hourly-based id set
    pub fn set_hourly_based_ids(&mut self, ids: impl IntoIterator<Item = ServiceId>) {
        self.hourly_based_ids = ids.into_iter().collect();
    }

    /// Set or replace a single service's type
    pub fn set_service_type(&mut self, id: ServiceId, service_type: ServiceType) {
        self.types.insert(id, service_type);
    }

    pub fn is_empty(&self) -> bool {
        self.hourly_based_ids.is_empty() && self.types.is_empty()
    }
}

/// Serialize the type map the way the backend lists it: `[{"id": 1, "type": "wage"}]`
mod type_list {
    use super::{ServiceId, ServiceType, ServiceTypeEntry};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S>(map: &BTreeMap<ServiceId, ServiceType>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let entries: Vec<ServiceTypeEntry> = map
            .iter()
            .map(|(id, service_type)| ServiceTypeEntry {
                id: *id,
                service_type: *service_type,
            })
            .collect();
        entries.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<ServiceId, ServiceType>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<ServiceTypeEntry>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(|entry| (entry.id, entry.service_type))
            .collect())
    }
}
