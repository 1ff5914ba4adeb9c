//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::diff::generate_diff;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// A record was validated and its payload prepared for the backend
    Create,
    /// Local state (settings, catalog) was changed
    Update,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    AccountingEntry,
    LogbookEntry,
    Settings,
    ServiceCatalog,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::AccountingEntry => write!(f, "AccountingEntry"),
            EntityType::LogbookEntry => write!(f, "LogbookEntry"),
            EntityType::Settings => write!(f, "Settings"),
            EntityType::ServiceCatalog => write!(f, "ServiceCatalog"),
        }
    }
}

/// One line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,

    /// Service id, vehicle id, or the name of the local file ("settings", "catalog")
    pub entity_id: String,

    /// One-line description of the record, e.g. "2025-03-04 svc-4 x2.5"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// The payload sent to the backend, or the new local state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,
}

impl AuditEntry {
    fn new(
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        summary: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            summary,
            before: None,
            after: None,
            changes: None,
        }
    }

    /// Entry for a record prepared for the backend
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        summary: Option<String>,
        payload: &T,
    ) -> Self {
        Self {
            after: serde_json::to_value(payload).ok(),
            ..Self::new(Operation::Create, entity_type, entity_id.into(), summary)
        }
    }

    /// Entry for a change of local state; the diff is computed from both states
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        summary: Option<String>,
        before: &T,
        after: &T,
    ) -> Self {
        let before = serde_json::to_value(before).ok();
        let after = serde_json::to_value(after).ok();
        let changes = before
            .as_ref()
            .zip(after.as_ref())
            .and_then(|(b, a)| generate_diff(b, a));

        Self {
            before,
            after,
            changes,
            ..Self::new(Operation::Update, entity_type, entity_id.into(), summary)
        }
    }

    /// `[timestamp] OPERATION EntityType id (summary)`, followed by the changes if any
    pub fn format_human_readable(&self) -> String {
        let mut line = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );
        if let Some(summary) = &self.summary {
            line = format!("{} ({})", line, summary);
        }

        match &self.changes {
            Some(changes) => format!("{}\n  Changes: {}", line, changes),
            None => line,
        }
    }
}
