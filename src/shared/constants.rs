/// Length of the history strip and uptime window, in days.
pub const HISTORY_WINDOW_DAYS: i64 = 90;

/// Display format for record timestamps, e.g. "September 07, 2024 at 10:45 PM".
pub const TIMESTAMP_DISPLAY_FORMAT: &str = "%B %d, %Y at %I:%M %p";

/// Template rendered for `GET /`.
pub const INDEX_TEMPLATE: &str = "index.html.jinja";

/// Template rendered for `GET /incident/{date}`.
pub const INCIDENT_DETAIL_TEMPLATE: &str = "incident_detail.html.jinja";
