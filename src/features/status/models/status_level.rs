use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Severity tier for a status type.
///
/// Variant order is the resolution priority: the overall page status is the
/// `max` level referenced by any unresolved record. Adding a tier means
/// adding a variant in the right position, nothing else.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum StatusLevel {
    Operational,
    Investigating,
    DegradedPerformance,
    UnderMaintenance,
    PartialOutage,
    MajorOutage,
}

impl StatusLevel {
    /// Parse a status-type label from the configuration file.
    ///
    /// Unknown labels are a configuration error, handled at load time.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Operational" => Some(Self::Operational),
            "Investigating" => Some(Self::Investigating),
            "Degraded Performance" => Some(Self::DegradedPerformance),
            "Under Maintenance" => Some(Self::UnderMaintenance),
            "Partial Outage" => Some(Self::PartialOutage),
            "Major Outage" => Some(Self::MajorOutage),
            _ => None,
        }
    }

    /// Display label shown on the page and in `overallStatus`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Operational => "Operational",
            Self::Investigating => "Investigating",
            Self::DegradedPerformance => "Degraded Performance",
            Self::UnderMaintenance => "Under Maintenance",
            Self::PartialOutage => "Partial Outage",
            Self::MajorOutage => "Major Outage",
        }
    }

    /// CSS class used by the templates for badges and category rows.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Operational => "operational",
            Self::Investigating => "investigating",
            Self::DegradedPerformance => "degraded",
            Self::UnderMaintenance => "maintenance",
            Self::PartialOutage => "partial-outage",
            Self::MajorOutage => "major-outage",
        }
    }

    /// Short type tag used by the 90-day history bars.
    pub fn history_tag(&self) -> &'static str {
        match self {
            Self::Operational => "operational",
            Self::Investigating => "investigating",
            Self::DegradedPerformance => "degraded",
            Self::UnderMaintenance => "maintenance",
            Self::PartialOutage => "partial",
            Self::MajorOutage => "major",
        }
    }

}

/// Aggregate outcome of status resolution.
///
/// `NoStatuses` is produced when `ShowStatuses` is off; it is deliberately a
/// distinct outcome from an empty current list, which resolves to
/// `Level(Operational)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallStatus {
    NoStatuses,
    Level(StatusLevel),
}

impl OverallStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoStatuses => "No Statuses",
            Self::Level(level) => level.label(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::NoStatuses => "no-statuses",
            Self::Level(level) => level.css_class(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert!(StatusLevel::MajorOutage > StatusLevel::PartialOutage);
        assert!(StatusLevel::PartialOutage > StatusLevel::UnderMaintenance);
        assert!(StatusLevel::UnderMaintenance > StatusLevel::DegradedPerformance);
        assert!(StatusLevel::DegradedPerformance > StatusLevel::Investigating);
        assert!(StatusLevel::Investigating > StatusLevel::Operational);
    }

    #[test]
    fn test_label_round_trip() {
        for level in [
            StatusLevel::Operational,
            StatusLevel::Investigating,
            StatusLevel::DegradedPerformance,
            StatusLevel::UnderMaintenance,
            StatusLevel::PartialOutage,
            StatusLevel::MajorOutage,
        ] {
            assert_eq!(StatusLevel::from_label(level.label()), Some(level));
        }
    }

    #[test]
    fn test_unknown_label_rejected() {
        assert_eq!(StatusLevel::from_label("Catastrophic"), None);
        assert_eq!(StatusLevel::from_label("operational"), None);
        assert_eq!(StatusLevel::from_label(""), None);
    }

    #[test]
    fn test_no_statuses_is_not_operational() {
        assert_ne!(
            OverallStatus::NoStatuses,
            OverallStatus::Level(StatusLevel::Operational)
        );
        assert_ne!(OverallStatus::NoStatuses.label(), "Operational");
    }
}
