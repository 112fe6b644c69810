use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use crate::features::status::models::{
    Category, StatusConfig, StatusConfigFile, StatusLevel, StatusRecordEntry, StatusType,
};

/// Errors raised while loading and validating the configuration file.
///
/// Any of these is fatal at startup: the process must not serve traffic
/// with an invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read configuration file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed configuration file '{path}': {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("duplicate StatusID {0} in StatusTypes")]
    DuplicateStatusId(i64),

    #[error("duplicate CategoryID {0} in StatusCategories")]
    DuplicateCategoryId(i64),

    #[error("unknown status label '{0}' in StatusTypes")]
    UnknownStatusLabel(String),

    #[error("record '{title}' references undefined StatusID {status_id}")]
    DanglingStatusRef { title: String, status_id: i64 },

    #[error("record '{title}' references undefined CategoryID {category_id}")]
    DanglingCategoryRef { title: String, category_id: i64 },

    #[error("record '{title}' has FixedAt {fixed_at} earlier than StartedAt {started_at}")]
    NegativeDuration {
        title: String,
        started_at: i64,
        fixed_at: i64,
    },
}

/// Load the status configuration from `path` and validate it.
///
/// Returns the immutable aggregate the rest of the service runs on.
pub fn load_config(path: &Path) -> Result<StatusConfig, ConfigLoadError> {
    let display_path = path.display().to_string();

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: display_path.clone(),
        source,
    })?;

    let file: StatusConfigFile =
        serde_json::from_str(&raw).map_err(|source| ConfigLoadError::Parse {
            path: display_path,
            source,
        })?;

    validate(file)
}

/// Validate a parsed configuration document.
///
/// Checks, in order: unique definitions, known status labels, referential
/// integrity of every record, non-negative incident durations.
pub fn validate(file: StatusConfigFile) -> Result<StatusConfig, ConfigLoadError> {
    let mut seen_type_ids = HashSet::new();
    let mut status_types = Vec::with_capacity(file.status_types.len());
    for entry in file.status_types {
        if !seen_type_ids.insert(entry.status_id) {
            return Err(ConfigLoadError::DuplicateStatusId(entry.status_id));
        }
        let level = StatusLevel::from_label(&entry.label)
            .ok_or_else(|| ConfigLoadError::UnknownStatusLabel(entry.label.clone()))?;
        status_types.push(StatusType {
            id: entry.status_id,
            label: entry.label,
            level,
        });
    }

    let mut seen_category_ids = HashSet::new();
    let mut categories = Vec::with_capacity(file.status_categories.len());
    for entry in file.status_categories {
        if !seen_category_ids.insert(entry.category_id) {
            return Err(ConfigLoadError::DuplicateCategoryId(entry.category_id));
        }
        categories.push(Category {
            id: entry.category_id,
            name: entry.name,
        });
    }

    for record in file
        .current_statuses
        .iter()
        .chain(file.past_incidents.iter())
    {
        validate_record(record, &seen_type_ids, &seen_category_ids)?;
    }

    Ok(StatusConfig::new(
        file.show_statuses,
        status_types,
        categories,
        file.current_statuses,
        file.past_incidents,
    ))
}

fn validate_record(
    record: &StatusRecordEntry,
    type_ids: &HashSet<i64>,
    category_ids: &HashSet<i64>,
) -> Result<(), ConfigLoadError> {
    // An empty StatusID list is allowed: such a record contributes an
    // Operational tier rather than failing the load.
    for &status_id in &record.status_ids {
        if !type_ids.contains(&status_id) {
            return Err(ConfigLoadError::DanglingStatusRef {
                title: record.title.clone(),
                status_id,
            });
        }
    }

    for &category_id in &record.category_ids {
        if !category_ids.contains(&category_id) {
            return Err(ConfigLoadError::DanglingCategoryRef {
                title: record.title.clone(),
                category_id,
            });
        }
    }

    if let Some(fixed_at) = record.fixed_at {
        if fixed_at < record.started_at {
            return Err(ConfigLoadError::NegativeDuration {
                title: record.title.clone(),
                started_at: record.started_at,
                fixed_at,
            });
        }
    }

    Ok(())
}
