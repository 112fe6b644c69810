use axum::{
    extract::{Path, State},
    response::Html,
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::core::error::{AppError, Result};
use crate::features::status::dtos::{CategoryRow, DayHistory, StatusView};
use crate::features::status::routes::StatusPageState;
use crate::shared::constants::{INCIDENT_DETAIL_TEMPLATE, INDEX_TEMPLATE};

/// Template context for the index page.
#[derive(Debug, Serialize)]
struct IndexContext {
    show_statuses: bool,
    message: Option<&'static str>,
    overall_status: &'static str,
    overall_class: &'static str,
    current_statuses: Vec<StatusView>,
    past_incidents: Vec<StatusView>,
    categories: Vec<CategoryRow>,
    overall_uptime: f64,
    history_data: Vec<DayHistory>,
}

/// Template context for the incident-detail page.
#[derive(Debug, Serialize)]
struct IncidentDetailContext {
    date: String,
    incidents: Vec<StatusView>,
}

/// Render the status page.
///
/// With `ShowStatuses` off the page carries only the "no statuses" message;
/// the overall label stays the sentinel, never "Operational".
pub async fn index(State(state): State<StatusPageState>) -> Result<Html<String>> {
    let service = &state.service;
    let overall = service.overall_status();

    let ctx = if service.show_statuses() {
        let now = Utc::now();
        IndexContext {
            show_statuses: true,
            message: None,
            overall_status: overall.label(),
            overall_class: overall.css_class(),
            current_statuses: service.current_status_views(),
            past_incidents: service.past_incident_views(),
            categories: service.category_rows(now),
            overall_uptime: service.uptime_percent(now),
            history_data: service.day_history(now),
        }
    } else {
        IndexContext {
            show_statuses: false,
            message: Some("No statuses have been recently posted."),
            overall_status: overall.label(),
            overall_class: overall.css_class(),
            current_statuses: Vec::new(),
            past_incidents: Vec::new(),
            categories: Vec::new(),
            overall_uptime: 0.0,
            history_data: Vec::new(),
        }
    };

    let html = state.templates.render(INDEX_TEMPLATE, ctx)?;
    Ok(Html(html))
}

/// Render the incident-detail page for one `YYYY-MM-DD` day.
pub async fn incident_detail(
    State(state): State<StatusPageState>,
    Path(date): Path<String>,
) -> Result<Html<String>> {
    let day = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", date)))?;

    let ctx = IncidentDetailContext {
        date: day.format("%Y-%m-%d").to_string(),
        incidents: state.service.incidents_on(day),
    };

    let html = state.templates.render(INCIDENT_DETAIL_TEMPLATE, ctx)?;
    Ok(Html(html))
}
