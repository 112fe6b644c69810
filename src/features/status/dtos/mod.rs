pub mod page_dto;
pub mod status_dto;

pub use page_dto::{CategoryRow, DayHistory, DayIncident, StatusView};
pub use status_dto::{CategoryDto, StatusRecordDto, StatusSnapshotDto, StatusTypeDto};
