use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::status::handlers;
use crate::features::status::services::StatusService;
use crate::shared::templates::PageTemplates;

/// Shared state for the status feature: the resolver service over the loaded
/// configuration plus the page template engine. Both are immutable after
/// startup.
#[derive(Clone)]
pub struct StatusPageState {
    pub service: Arc<StatusService>,
    pub templates: Arc<PageTemplates>,
}

/// Create routes for the status feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(state: StatusPageState) -> Router {
    Router::new()
        .route("/", get(handlers::page_handler::index))
        .route("/incident/{date}", get(handlers::page_handler::incident_detail))
        .route("/api/status", get(handlers::api_handler::get_status))
        .with_state(state)
}
