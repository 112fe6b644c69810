pub mod status_config;
pub mod status_level;

pub use status_config::{
    Category, CategoryEntry, StatusConfig, StatusConfigFile, StatusRecordEntry, StatusType,
    StatusTypeEntry,
};
pub use status_level::{OverallStatus, StatusLevel};
