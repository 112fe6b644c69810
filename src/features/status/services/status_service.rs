use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::features::status::dtos::{CategoryRow, DayHistory, DayIncident, StatusView};
use crate::features::status::models::{
    OverallStatus, StatusConfig, StatusLevel, StatusRecordEntry,
};
use crate::shared::constants::{HISTORY_WINDOW_DAYS, TIMESTAMP_DISPLAY_FORMAT};

/// Read-side service over the loaded configuration: status resolution,
/// uptime arithmetic, history, and the processed views the pages render.
///
/// Holds the immutable config behind an `Arc`; every method is a pure
/// function of that config and an explicit `now`, which keeps the whole
/// service testable with pinned clocks and multiple configs per test run.
pub struct StatusService {
    config: Arc<StatusConfig>,
}

impl StatusService {
    pub fn new(config: Arc<StatusConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StatusConfig {
        &self.config
    }

    pub fn show_statuses(&self) -> bool {
        self.config.show_statuses
    }

    /// Current (unresolved) records. Entries that carry a `FixedAt` despite
    /// living in `CurrentStatuses` are treated as resolved and skipped.
    pub fn active_statuses(&self) -> impl Iterator<Item = &StatusRecordEntry> {
        self.config
            .current_statuses
            .iter()
            .filter(|r| !r.is_resolved())
    }

    /// Resolved past incidents. Entries without a `FixedAt` are skipped.
    pub fn resolved_incidents(&self) -> impl Iterator<Item = &StatusRecordEntry> {
        self.config
            .past_incidents
            .iter()
            .filter(|r| r.is_resolved())
    }

    /// Severity tier a single record contributes: the highest tier among its
    /// referenced status types. An empty `StatusID` list contributes
    /// `Operational`.
    pub fn record_level(&self, record: &StatusRecordEntry) -> StatusLevel {
        record
            .status_ids
            .iter()
            .filter_map(|&id| self.config.level_of(id))
            .max()
            .unwrap_or(StatusLevel::Operational)
    }

    /// Resolve the one overall status for the page.
    ///
    /// `ShowStatuses` off yields the `NoStatuses` sentinel. With statuses
    /// shown, the highest tier referenced by any active record wins; no
    /// active records means `Operational`. The sentinel and `Operational`
    /// are distinct outcomes.
    pub fn overall_status(&self) -> OverallStatus {
        if !self.config.show_statuses {
            return OverallStatus::NoStatuses;
        }

        let level = self
            .active_statuses()
            .map(|r| self.record_level(r))
            .max()
            .unwrap_or(StatusLevel::Operational);

        OverallStatus::Level(level)
    }

    /// Active statuses as display views for the index page.
    pub fn current_status_views(&self) -> Vec<StatusView> {
        self.active_statuses()
            .map(|r| self.record_view(r))
            .collect()
    }

    /// Resolved incidents as display views for the index page.
    pub fn past_incident_views(&self) -> Vec<StatusView> {
        self.resolved_incidents()
            .map(|r| self.record_view(r))
            .collect()
    }

    fn record_view(&self, record: &StatusRecordEntry) -> StatusView {
        StatusView {
            title: record.title.clone(),
            description: record.description.clone(),
            reported_by: record.reported_by.clone(),
            started_at: format_timestamp(record.started_at),
            fixed_at: record.fixed_at.map(format_timestamp),
            duration_secs: record.duration_secs(),
            status_names: record
                .status_ids
                .iter()
                .filter_map(|&id| self.config.status_type(id))
                .map(|t| t.label.clone())
                .collect(),
            category_names: record
                .category_ids
                .iter()
                .filter_map(|&id| self.config.category(id))
                .map(|c| c.name.clone())
                .collect(),
            css_class: self.record_level(record).css_class(),
        }
    }

    /// Per-category health rows: worst active tier touching the category,
    /// plus the category's trailing-window uptime.
    pub fn category_rows(&self, now: DateTime<Utc>) -> Vec<CategoryRow> {
        self.config
            .categories
            .iter()
            .map(|category| {
                let level = self
                    .active_statuses()
                    .filter(|r| r.category_ids.contains(&category.id))
                    .map(|r| self.record_level(r))
                    .max()
                    .unwrap_or(StatusLevel::Operational);

                CategoryRow {
                    name: category.name.clone(),
                    status_text: level.label().to_string(),
                    css_class: level.css_class(),
                    uptime: self.uptime_percent_for(now, Some(category.id)),
                }
            })
            .collect()
    }

    /// Uptime percentage across all categories for the trailing window.
    pub fn uptime_percent(&self, now: DateTime<Utc>) -> f64 {
        self.uptime_percent_for(now, None)
    }

    /// Share of the trailing 90-day window not covered by incident downtime.
    ///
    /// Downtime is the union-free sum of record intervals clamped to the
    /// window: past incidents use `[StartedAt, FixedAt]`, active statuses
    /// run until `now`. Records at the `Operational` tier do not count.
    /// With `category` set, only records referencing it are considered.
    fn uptime_percent_for(&self, now: DateTime<Utc>, category: Option<i64>) -> f64 {
        let window_secs = (HISTORY_WINDOW_DAYS * 86_400) as f64;
        let window_start = now.timestamp() - HISTORY_WINDOW_DAYS * 86_400;

        // Resolved records from either list, plus active statuses which
        // accrue downtime until `now`. Unresolved entries sitting in
        // PastIncidents are skipped, mirroring the render path.
        let resolved = self
            .config
            .current_statuses
            .iter()
            .chain(self.config.past_incidents.iter())
            .filter(|r| r.is_resolved());

        let mut downtime: i64 = 0;
        for record in resolved.chain(self.active_statuses()) {
            if let Some(category_id) = category {
                if !record.category_ids.contains(&category_id) {
                    continue;
                }
            }
            if self.record_level(record) == StatusLevel::Operational {
                continue;
            }

            let start = record.started_at.max(window_start);
            let end = record.fixed_at.unwrap_or_else(|| now.timestamp());
            let end = end.min(now.timestamp());
            if end > start {
                downtime += end - start;
            }
        }

        let downtime = (downtime as f64).min(window_secs);
        round2((1.0 - downtime / window_secs) * 100.0)
    }

    /// The 90-day history strip, oldest day first.
    ///
    /// A day takes the worst tier among records started on it (both past
    /// incidents and active statuses); days without records are
    /// operational.
    pub fn day_history(&self, now: DateTime<Utc>) -> Vec<DayHistory> {
        let mut by_day: BTreeMap<NaiveDate, (StatusLevel, Vec<DayIncident>)> = BTreeMap::new();

        let records = self
            .resolved_incidents()
            .chain(self.active_statuses())
            .collect::<Vec<_>>();
        for record in records {
            let Some(day) = epoch_date(record.started_at) else {
                continue;
            };
            let level = self.record_level(record);
            let incident = DayIncident {
                title: record.title.clone(),
                kind: level.history_tag(),
                description: record.description.clone(),
                reported_by: record.reported_by.clone(),
                started_at: record.started_at,
                fixed_at: record.fixed_at,
            };

            match by_day.entry(day) {
                Entry::Occupied(mut occupied) => {
                    let (worst, incidents) = occupied.get_mut();
                    *worst = (*worst).max(level);
                    incidents.push(incident);
                }
                Entry::Vacant(vacant) => {
                    vacant.insert((level, vec![incident]));
                }
            }
        }

        let today = now.date_naive();
        (0..HISTORY_WINDOW_DAYS)
            .rev()
            .filter_map(|offset| today.checked_sub_signed(Duration::days(offset)))
            .map(|day| {
                let (level, incidents) = by_day
                    .get(&day)
                    .cloned()
                    .unwrap_or((StatusLevel::Operational, Vec::new()));
                DayHistory {
                    date: day.format("%Y-%m-%d").to_string(),
                    status: level.history_tag(),
                    incidents,
                    timestamp: day.and_time(NaiveTime::MIN).and_utc().timestamp(),
                }
            })
            .collect()
    }

    /// All records (past and active) whose `StartedAt` falls on the given
    /// UTC date. Backs the incident-detail page.
    pub fn incidents_on(&self, date: NaiveDate) -> Vec<StatusView> {
        self.resolved_incidents()
            .chain(self.active_statuses())
            .filter(|r| epoch_date(r.started_at) == Some(date))
            .map(|r| self.record_view(r))
            .collect()
    }
}

/// Format an epoch-seconds timestamp for display, e.g.
/// "September 07, 2024 at 10:45 PM" (UTC).
pub fn format_timestamp(epoch_secs: i64) -> String {
    match Utc.timestamp_opt(epoch_secs, 0).single() {
        Some(dt) => dt.format(TIMESTAMP_DISPLAY_FORMAT).to_string(),
        None => String::new(),
    }
}

fn epoch_date(epoch_secs: i64) -> Option<NaiveDate> {
    Utc.timestamp_opt(epoch_secs, 0)
        .single()
        .map(|dt| dt.date_naive())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::status::models::StatusConfigFile;
    use crate::features::status::services::config_loader;

    fn service(json: &str) -> StatusService {
        let file: StatusConfigFile = serde_json::from_str(json).expect("test JSON must parse");
        let config = config_loader::validate(file).expect("test config must validate");
        StatusService::new(Arc::new(config))
    }

    fn base_config(show: bool, current: &str, past: &str) -> String {
        format!(
            r#"{{
                "ShowStatuses": {show},
                "StatusCategories": [
                    {{"CategoryID": 1, "CategoryName": "API"}},
                    {{"CategoryID": 2, "CategoryName": "Database"}}
                ],
                "StatusTypes": [
                    {{"StatusID": 1, "Status": "Operational"}},
                    {{"StatusID": 2, "Status": "Degraded Performance"}},
                    {{"StatusID": 3, "Status": "Partial Outage"}},
                    {{"StatusID": 4, "Status": "Major Outage"}},
                    {{"StatusID": 5, "Status": "Under Maintenance"}},
                    {{"StatusID": 6, "Status": "Investigating"}}
                ],
                "CurrentStatuses": [{current}],
                "PastIncidents": [{past}]
            }}"#
        )
    }

    #[test]
    fn test_show_statuses_off_is_sentinel() {
        let current = r#"{"StatusTitle": "Down", "StatusID": [4], "StartedAt": 1725749130}"#;
        let svc = service(&base_config(false, current, ""));
        assert_eq!(svc.overall_status(), OverallStatus::NoStatuses);
        assert_eq!(svc.overall_status().label(), "No Statuses");
    }

    #[test]
    fn test_empty_current_list_is_operational() {
        let svc = service(&base_config(true, "", ""));
        assert_eq!(
            svc.overall_status(),
            OverallStatus::Level(StatusLevel::Operational)
        );
        assert_eq!(svc.overall_status().label(), "Operational");
    }

    #[test]
    fn test_major_outage_wins_over_everything() {
        let current = r#"
            {"StatusTitle": "Slow", "StatusID": [2], "StartedAt": 1725749130},
            {"StatusTitle": "Down", "StatusID": [4], "StartedAt": 1725749130},
            {"StatusTitle": "Maint", "StatusID": [5], "StartedAt": 1725749130}
        "#;
        let svc = service(&base_config(true, current, ""));
        assert_eq!(svc.overall_status().label(), "Major Outage");
    }

    #[test]
    fn test_highest_tier_within_one_record() {
        let current =
            r#"{"StatusTitle": "Mixed", "StatusID": [1, 6, 3], "StartedAt": 1725749130}"#;
        let svc = service(&base_config(true, current, ""));
        assert_eq!(svc.overall_status().label(), "Partial Outage");
    }

    #[test]
    fn test_empty_status_id_list_contributes_operational() {
        let current = r#"{"StatusTitle": "Note", "StatusID": [], "StartedAt": 1725749130}"#;
        let svc = service(&base_config(true, current, ""));
        assert_eq!(svc.overall_status().label(), "Operational");
    }

    #[test]
    fn test_resolved_entry_in_current_list_is_ignored() {
        let current = r#"{"StatusTitle": "Old", "StatusID": [4], "StartedAt": 100, "FixedAt": 200}"#;
        let svc = service(&base_config(true, current, ""));
        assert_eq!(svc.overall_status().label(), "Operational");
        assert!(svc.current_status_views().is_empty());
    }

    #[test]
    fn test_record_view_resolves_names() {
        let current = r#"{
            "StatusTitle": "API degraded",
            "StatusDescription": "Slow responses",
            "By": "ops",
            "StatusID": [2],
            "CategoryID": [1],
            "StartedAt": 1725749130
        }"#;
        let svc = service(&base_config(true, current, ""));
        let views = svc.current_status_views();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].status_names, vec!["Degraded Performance"]);
        assert_eq!(views[0].category_names, vec!["API"]);
        assert_eq!(views[0].css_class, "degraded");
        assert_eq!(views[0].started_at, "September 07, 2024 at 10:45 PM");
    }

    #[test]
    fn test_category_rows_reflect_active_statuses() {
        let current = r#"{
            "StatusTitle": "DB down",
            "StatusID": [4],
            "CategoryID": [2],
            "StartedAt": 1725749130
        }"#;
        let svc = service(&base_config(true, current, ""));
        let now = Utc.timestamp_opt(1725760000, 0).single().unwrap();
        let rows = svc.category_rows(now);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "API");
        assert_eq!(rows[0].status_text, "Operational");
        assert_eq!(rows[1].name, "Database");
        assert_eq!(rows[1].status_text, "Major Outage");
        assert_eq!(rows[1].css_class, "major-outage");
    }

    #[test]
    fn test_uptime_counts_incident_downtime() {
        // One resolved incident, exactly one hour, inside the window.
        let past = r#"{
            "StatusTitle": "Outage",
            "StatusID": [4],
            "CategoryID": [1],
            "StartedAt": 1725749130,
            "FixedAt": 1725752730
        }"#;
        let svc = service(&base_config(true, "", past));
        let now = Utc.timestamp_opt(1725800000, 0).single().unwrap();

        let expected: f64 = (1.0 - 3600.0 / (90.0 * 86400.0)) * 100.0;
        let expected = (expected * 100.0).round() / 100.0;
        assert_eq!(svc.uptime_percent(now), expected);
    }

    #[test]
    fn test_uptime_ignores_operational_records_and_old_incidents() {
        let past = r#"
            {"StatusTitle": "Note", "StatusID": [1], "StartedAt": 1725749130, "FixedAt": 1725752730},
            {"StatusTitle": "Ancient", "StatusID": [4], "StartedAt": 1000, "FixedAt": 5000}
        "#;
        let svc = service(&base_config(true, "", past));
        let now = Utc.timestamp_opt(1725800000, 0).single().unwrap();
        assert_eq!(svc.uptime_percent(now), 100.0);
    }

    #[test]
    fn test_ongoing_status_accrues_downtime_until_now() {
        let current = r#"{"StatusTitle": "Down", "StatusID": [4], "StartedAt": 1725796400}"#;
        let svc = service(&base_config(true, current, ""));
        let now = Utc.timestamp_opt(1725800000, 0).single().unwrap();

        let expected: f64 = (1.0 - 3600.0 / (90.0 * 86400.0)) * 100.0;
        let expected = (expected * 100.0).round() / 100.0;
        assert_eq!(svc.uptime_percent(now), expected);
    }

    #[test]
    fn test_day_history_is_chronological_and_full_window() {
        let past = r#"{
            "StatusTitle": "Outage",
            "StatusID": [4],
            "StartedAt": 1725749130,
            "FixedAt": 1725752730
        }"#;
        let svc = service(&base_config(true, "", past));
        // 2024-09-10, a few days after the incident on 2024-09-07.
        let now = Utc.timestamp_opt(1725963930, 0).single().unwrap();
        let history = svc.day_history(now);

        assert_eq!(history.len(), HISTORY_WINDOW_DAYS as usize);
        assert_eq!(history.last().unwrap().date, "2024-09-10");
        assert!(history.windows(2).all(|w| w[0].date < w[1].date));

        let incident_day = history.iter().find(|d| d.date == "2024-09-07").unwrap();
        assert_eq!(incident_day.status, "major");
        assert_eq!(incident_day.incidents.len(), 1);
        assert_eq!(incident_day.incidents[0].title, "Outage");

        let quiet_day = history.iter().find(|d| d.date == "2024-09-08").unwrap();
        assert_eq!(quiet_day.status, "operational");
        assert!(quiet_day.incidents.is_empty());
    }

    #[test]
    fn test_day_history_worst_tier_wins_per_day() {
        let past = r#"
            {"StatusTitle": "Blip", "StatusID": [6], "StartedAt": 1725749130, "FixedAt": 1725749730},
            {"StatusTitle": "Outage", "StatusID": [3], "StartedAt": 1725750000, "FixedAt": 1725752730}
        "#;
        let svc = service(&base_config(true, "", past));
        let now = Utc.timestamp_opt(1725963930, 0).single().unwrap();
        let history = svc.day_history(now);

        let day = history.iter().find(|d| d.date == "2024-09-07").unwrap();
        assert_eq!(day.status, "partial");
        assert_eq!(day.incidents.len(), 2);
    }

    #[test]
    fn test_incidents_on_date() {
        let past = r#"{
            "StatusTitle": "Outage",
            "StatusID": [4],
            "StartedAt": 1725749130,
            "FixedAt": 1725752730
        }"#;
        let current = r#"{"StatusTitle": "Ongoing", "StatusID": [6], "StartedAt": 1725749130}"#;
        let svc = service(&base_config(true, current, past));

        let date = NaiveDate::from_ymd_opt(2024, 9, 7).unwrap();
        let incidents = svc.incidents_on(date);
        assert_eq!(incidents.len(), 2);
        assert_eq!(incidents[0].title, "Outage");
        assert!(incidents[0].fixed_at.is_some());
        assert_eq!(incidents[0].duration_secs, Some(3600));
        assert_eq!(incidents[1].title, "Ongoing");
        assert!(incidents[1].fixed_at.is_none());

        let empty = svc.incidents_on(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(1725749130), "September 07, 2024 at 10:45 PM");
    }
}
