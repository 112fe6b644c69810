use utoipa::{Modify, OpenApi};

use crate::features::status::{dtos as status_dtos, handlers as status_handlers};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Status (public)
        status_handlers::api_handler::get_status,
    ),
    components(schemas(
        ApiResponse<String>,
        status_dtos::StatusSnapshotDto,
        status_dtos::CategoryDto,
        status_dtos::StatusTypeDto,
        status_dtos::StatusRecordDto,
    )),
    tags(
        (name = "status", description = "Status page endpoints")
    )
)]
pub struct ApiDoc;

/// Injects the configured title/version/description into the OpenAPI document.
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
