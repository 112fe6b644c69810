use std::collections::HashMap;

use serde::Deserialize;

use crate::features::status::models::StatusLevel;

/// Raw configuration document as it appears on disk.
///
/// Key names match the file format (`ShowStatuses`, `StatusTypes`, ...);
/// all sections are optional and default to empty so a minimal file still
/// parses. Referential validation happens in the loader, not here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusConfigFile {
    #[serde(rename = "ShowStatuses", default)]
    pub show_statuses: bool,

    #[serde(rename = "StatusCategories", default)]
    pub status_categories: Vec<CategoryEntry>,

    #[serde(rename = "StatusTypes", default)]
    pub status_types: Vec<StatusTypeEntry>,

    #[serde(rename = "CurrentStatuses", default)]
    pub current_statuses: Vec<StatusRecordEntry>,

    #[serde(rename = "PastIncidents", default)]
    pub past_incidents: Vec<StatusRecordEntry>,
}

/// Status-type definition: `{"StatusID": 4, "Status": "Major Outage"}`
#[derive(Debug, Clone, Deserialize)]
pub struct StatusTypeEntry {
    #[serde(rename = "StatusID")]
    pub status_id: i64,

    #[serde(rename = "Status")]
    pub label: String,
}

/// Category definition: `{"CategoryID": 1, "CategoryName": "API"}`
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryEntry {
    #[serde(rename = "CategoryID")]
    pub category_id: i64,

    #[serde(rename = "CategoryName")]
    pub name: String,
}

/// A current status or past incident entry.
///
/// Timestamps are Unix epoch seconds. A record with `FixedAt` absent is
/// current; with `FixedAt` present it is resolved.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusRecordEntry {
    #[serde(rename = "StatusTitle", default)]
    pub title: String,

    #[serde(rename = "StatusDescription", default)]
    pub description: String,

    #[serde(rename = "By", default)]
    pub reported_by: String,

    #[serde(rename = "StatusID", default)]
    pub status_ids: Vec<i64>,

    #[serde(rename = "CategoryID", default)]
    pub category_ids: Vec<i64>,

    #[serde(rename = "StartedAt")]
    pub started_at: i64,

    #[serde(rename = "FixedAt", default)]
    pub fixed_at: Option<i64>,
}

impl StatusRecordEntry {
    pub fn is_resolved(&self) -> bool {
        self.fixed_at.is_some()
    }

    /// Incident duration in whole seconds, when the record is resolved.
    ///
    /// The loader guarantees `fixed_at >= started_at` for every record it
    /// accepts, so this never goes negative after validation.
    pub fn duration_secs(&self) -> Option<i64> {
        self.fixed_at.map(|fixed| fixed - self.started_at)
    }
}

/// Status-type metadata with its severity tier resolved from the label.
#[derive(Debug, Clone)]
pub struct StatusType {
    pub id: i64,
    pub label: String,
    pub level: StatusLevel,
}

/// Category metadata.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Validated, immutable configuration consumed by the rest of the service.
///
/// Built once at startup by the loader and shared via `Arc`; nothing mutates
/// it afterwards. Lookups that survived validation cannot dangle.
#[derive(Debug, Clone)]
pub struct StatusConfig {
    pub show_statuses: bool,
    pub status_types: Vec<StatusType>,
    pub categories: Vec<Category>,
    pub current_statuses: Vec<StatusRecordEntry>,
    pub past_incidents: Vec<StatusRecordEntry>,
    types_by_id: HashMap<i64, usize>,
    categories_by_id: HashMap<i64, usize>,
}

impl StatusConfig {
    pub fn new(
        show_statuses: bool,
        status_types: Vec<StatusType>,
        categories: Vec<Category>,
        current_statuses: Vec<StatusRecordEntry>,
        past_incidents: Vec<StatusRecordEntry>,
    ) -> Self {
        let types_by_id = status_types
            .iter()
            .enumerate()
            .map(|(idx, t)| (t.id, idx))
            .collect();
        let categories_by_id = categories
            .iter()
            .enumerate()
            .map(|(idx, c)| (c.id, idx))
            .collect();

        Self {
            show_statuses,
            status_types,
            categories,
            current_statuses,
            past_incidents,
            types_by_id,
            categories_by_id,
        }
    }

    pub fn status_type(&self, id: i64) -> Option<&StatusType> {
        self.types_by_id.get(&id).map(|&idx| &self.status_types[idx])
    }

    pub fn category(&self, id: i64) -> Option<&Category> {
        self.categories_by_id
            .get(&id)
            .map(|&idx| &self.categories[idx])
    }

    /// Severity tier of one status-type id.
    ///
    /// Ids are validated at load time; an id that slipped through anyway
    /// contributes nothing rather than panicking in a request handler.
    pub fn level_of(&self, status_id: i64) -> Option<StatusLevel> {
        self.status_type(status_id).map(|t| t.level)
    }
}
