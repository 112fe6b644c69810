use serde::Serialize;

/// A current status or past incident prepared for template rendering:
/// id references resolved to names, timestamps formatted for display.
#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub title: String,
    pub description: String,
    pub reported_by: String,
    pub started_at: String,
    pub fixed_at: Option<String>,
    /// Whole seconds between start and fix; absent while unresolved.
    pub duration_secs: Option<i64>,
    pub status_names: Vec<String>,
    pub category_names: Vec<String>,
    pub css_class: &'static str,
}

/// One row of the per-category health table.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRow {
    pub name: String,
    pub status_text: String,
    pub css_class: &'static str,
    pub uptime: f64,
}

/// One cell of the 90-day history strip.
#[derive(Debug, Clone, Serialize)]
pub struct DayHistory {
    /// `YYYY-MM-DD`, UTC.
    pub date: String,
    /// Worst history tag for the day (`operational`, `degraded`, `major`, ...).
    pub status: &'static str,
    pub incidents: Vec<DayIncident>,
    pub timestamp: i64,
}

/// Incident summary attached to a history day cell.
#[derive(Debug, Clone, Serialize)]
pub struct DayIncident {
    pub title: String,
    pub kind: &'static str,
    pub description: String,
    pub reported_by: String,
    pub started_at: i64,
    pub fixed_at: Option<i64>,
}
