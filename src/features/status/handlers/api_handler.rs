use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::status::dtos::StatusSnapshotDto;
use crate::features::status::routes::StatusPageState;

/// Status snapshot as JSON
///
/// Mirrors the loaded configuration and adds the resolved overall status.
/// `overallStatus` always matches the label the HTML page displays.
#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Current status snapshot", body = StatusSnapshotDto),
    ),
    tag = "status"
)]
pub async fn get_status(State(state): State<StatusPageState>) -> Result<Json<StatusSnapshotDto>> {
    let service = &state.service;
    let config = service.config();

    let snapshot = StatusSnapshotDto {
        overall_status: service.overall_status().label().to_string(),
        categories: config.categories.iter().map(Into::into).collect(),
        status_types: config.status_types.iter().map(Into::into).collect(),
        current_statuses: config.current_statuses.iter().map(Into::into).collect(),
        past_incidents: config.past_incidents.iter().map(Into::into).collect(),
    };

    Ok(Json(snapshot))
}
