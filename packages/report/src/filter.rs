//! Year / district / village filters applied before aggregation.

use chrono::Datelike as _;
use housing_registry_models::{AreaRecord, HouseholdRecord, ReportPayload};
use housing_registry_report_models::DateWindow;
use serde::{Deserialize, Serialize};

use crate::parsing::RecordDay;
use crate::window::{UndatedPolicy, select_in_window};

/// Report filter dimensions. Every present dimension must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFilter {
    pub year: Option<i32>,
    pub district: Option<String>,
    pub village: Option<String>,
}

fn same_place(wanted: Option<&str>, actual: Option<&str>) -> bool {
    let Some(wanted) = wanted.map(str::trim).filter(|s| !s.is_empty()) else {
        return true;
    };
    actual.is_some_and(|actual| actual.trim().eq_ignore_ascii_case(wanted))
}

impl RecordFilter {
    /// Returns `true` if no dimension is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.year.is_none()
            && self.district.as_deref().is_none_or(|s| s.trim().is_empty())
            && self.village.as_deref().is_none_or(|s| s.trim().is_empty())
    }

    /// A household with no readable `createdAt` never matches a year.
    #[must_use]
    pub fn matches_household(&self, record: &HouseholdRecord) -> bool {
        let year_ok = self.year.is_none_or(|year| {
            matches!(
                RecordDay::of(record.created_at.as_deref()),
                RecordDay::Day(day) if day.year() == year
            )
        });

        year_ok
            && same_place(self.district.as_deref(), record.district.as_deref())
            && same_place(self.village.as_deref(), record.village.as_deref())
    }

    /// Areas carry no timestamp, so the year dimension does not apply.
    #[must_use]
    pub fn matches_area(&self, record: &AreaRecord) -> bool {
        same_place(self.district.as_deref(), record.district.as_deref())
            && same_place(self.village.as_deref(), record.village.as_deref())
    }

    /// Returns a copy of `payload` with non-matching households and areas
    /// removed. Infrastructure items pass through untouched.
    #[must_use]
    pub fn apply(&self, payload: &ReportPayload) -> ReportPayload {
        if self.is_empty() {
            return payload.clone();
        }

        let filtered = ReportPayload {
            households: payload
                .households
                .iter()
                .filter(|r| self.matches_household(r))
                .cloned()
                .collect(),
            infrastructure: payload.infrastructure.clone(),
            areas: payload
                .areas
                .iter()
                .filter(|r| self.matches_area(r))
                .cloned()
                .collect(),
        };

        log::debug!(
            "Filter {self:?} kept {}/{} households, {}/{} areas",
            filtered.households.len(),
            payload.households.len(),
            filtered.areas.len(),
            payload.areas.len()
        );

        filtered
    }
}

/// Returns a copy of `payload` limited to records created inside `window`.
///
/// Households follow the chart rules: undated or unreadable ones are
/// dropped. Infrastructure keeps undated items and drops unreadable ones.
/// Areas carry no timestamp and pass through.
#[must_use]
pub fn retain_in_window(payload: &ReportPayload, window: &DateWindow) -> ReportPayload {
    let households = select_in_window(
        &payload.households,
        window,
        |r| r.created_at.as_deref(),
        UndatedPolicy::Exclude,
        "household",
    );
    let infrastructure = select_in_window(
        &payload.infrastructure,
        window,
        |r| r.created_at.as_deref(),
        UndatedPolicy::Include,
        "infrastructure item",
    );

    log::debug!(
        "Window {window} kept {}/{} households, {}/{} infrastructure items",
        households.retained.len(),
        payload.households.len(),
        infrastructure.retained.len(),
        payload.infrastructure.len()
    );

    ReportPayload {
        households: households
            .retained
            .into_iter()
            .map(|(r, _)| r.clone())
            .collect(),
        infrastructure: infrastructure
            .retained
            .into_iter()
            .map(|(r, _)| r.clone())
            .collect(),
        areas: payload.areas.clone(),
    }
}

#[cfg(test)]
mod tests {
    use housing_registry_models::{GeometryKind, InfrastructureRecord};

    use super::*;
    use crate::parsing::parse_day;

    fn household(created_at: &str, district: &str, village: &str) -> HouseholdRecord {
        HouseholdRecord {
            created_at: Some(created_at.to_string()),
            district: Some(district.to_string()),
            village: Some(village.to_string()),
            ..HouseholdRecord::default()
        }
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let payload = ReportPayload {
            households: vec![household("2024-01-01", "North", "A"), HouseholdRecord::default()],
            ..ReportPayload::default()
        };
        assert!(RecordFilter::default().is_empty());
        assert_eq!(RecordFilter::default().apply(&payload), payload);
    }

    #[test]
    fn blank_dimensions_are_ignored() {
        let filter = RecordFilter {
            district: Some("  ".to_string()),
            ..RecordFilter::default()
        };
        assert!(filter.is_empty());
    }

    #[test]
    fn filters_households_by_every_dimension() {
        let payload = ReportPayload {
            households: vec![
                household("2024-03-01", "North", "Sukamaju"),
                household("2025-03-01", "North", "Sukamaju"),
                household("2024-05-01", "south", "Sukamaju"),
                household("2024-07-01", " north ", "sukamaju"),
                HouseholdRecord {
                    district: Some("North".to_string()),
                    village: Some("Sukamaju".to_string()),
                    ..HouseholdRecord::default()
                },
            ],
            ..ReportPayload::default()
        };
        let filter = RecordFilter {
            year: Some(2024),
            district: Some("North".to_string()),
            village: Some("SUKAMAJU".to_string()),
        };
        let applied = filter.apply(&payload);
        let kept: Vec<&str> = applied
            .households
            .iter()
            .filter_map(|r| r.created_at.as_deref())
            .collect();
        assert_eq!(kept, ["2024-03-01", "2024-07-01"]);
    }

    #[test]
    fn areas_ignore_year_and_missing_place_never_matches() {
        let payload = ReportPayload {
            areas: vec![
                AreaRecord {
                    name: Some("RW 01".to_string()),
                    district: Some("North".to_string()),
                    ..AreaRecord::default()
                },
                AreaRecord {
                    name: Some("RW 02".to_string()),
                    ..AreaRecord::default()
                },
            ],
            ..ReportPayload::default()
        };
        let filter = RecordFilter {
            year: Some(1990),
            district: Some("north".to_string()),
            village: None,
        };
        let areas = filter.apply(&payload).areas;
        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].name.as_deref(), Some("RW 01"));
    }

    #[test]
    fn window_limits_households_and_dated_infrastructure() {
        let item = |name: &str, created_at: Option<&str>| InfrastructureRecord {
            name: Some(name.to_string()),
            created_at: created_at.map(ToString::to_string),
            kind: GeometryKind::Point,
            category: None,
            count: Some(1),
        };
        let payload = ReportPayload {
            households: vec![
                household("2025-06-02", "North", "A"),
                household("2025-05-01", "North", "A"),
                household("someday", "North", "A"),
                HouseholdRecord::default(),
            ],
            infrastructure: vec![
                item("Old well", None),
                item("Bridge", Some("2025-06-03 10:00:00")),
                item("Canal", Some("2024-01-01")),
                item("Pier", Some("n/a")),
            ],
            areas: vec![AreaRecord::default()],
        };
        let window =
            DateWindow::bounded(parse_day("2025-06-01").unwrap(), parse_day("2025-06-05").unwrap())
                .unwrap();

        let retained = retain_in_window(&payload, &window);
        let households: Vec<&str> = retained
            .households
            .iter()
            .filter_map(|r| r.created_at.as_deref())
            .collect();
        let items: Vec<&str> = retained
            .infrastructure
            .iter()
            .filter_map(|r| r.name.as_deref())
            .collect();
        assert_eq!(households, ["2025-06-02"]);
        assert_eq!(items, ["Old well", "Bridge"]);
        assert_eq!(retained.areas, payload.areas);
    }
}
