use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::status::models::{Category, StatusRecordEntry, StatusType};

/// Full snapshot returned by `GET /api/status`: the loaded configuration
/// mirrored back, plus the resolved overall status label.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshotDto {
    /// Always matches the label the HTML page displays for the same
    /// configuration.
    pub overall_status: String,
    pub categories: Vec<CategoryDto>,
    pub status_types: Vec<StatusTypeDto>,
    pub current_statuses: Vec<StatusRecordDto>,
    pub past_incidents: Vec<StatusRecordDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusTypeDto {
    pub id: i64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecordDto {
    pub title: String,
    pub description: String,
    pub reported_by: String,
    pub status_type_ids: Vec<i64>,
    pub category_ids: Vec<i64>,
    /// Unix epoch seconds.
    pub started_at: i64,
    /// Unix epoch seconds; absent while the status is unresolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_at: Option<i64>,
}

impl From<&Category> for CategoryDto {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
        }
    }
}

impl From<&StatusType> for StatusTypeDto {
    fn from(t: &StatusType) -> Self {
        Self {
            id: t.id,
            label: t.label.clone(),
        }
    }
}

impl From<&StatusRecordEntry> for StatusRecordDto {
    fn from(r: &StatusRecordEntry) -> Self {
        Self {
            title: r.title.clone(),
            description: r.description.clone(),
            reported_by: r.reported_by.clone(),
            status_type_ids: r.status_ids.clone(),
            category_ids: r.category_ids.clone(),
            started_at: r.started_at,
            fixed_at: r.fixed_at,
        }
    }
}
