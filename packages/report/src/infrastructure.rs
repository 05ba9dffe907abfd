//! Infrastructure (PSU) summary for the dashboard chart.
//!
//! Unlike households, infrastructure items with no `createdAt` are always
//! kept: they predate tracking and are not subject to date filtering. Items
//! whose `createdAt` is present but unreadable are still skipped.

use housing_registry_models::{InfrastructureRecord, UNKNOWN_LABEL};
use housing_registry_report_models::{DateWindow, InfrastructureRow, InfrastructureSummary};

use crate::window::{UndatedPolicy, select_in_window};

fn label_or_unknown(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_LABEL)
        .to_string()
}

/// Builds one row per retained infrastructure item, in input order.
#[must_use]
pub fn summarize_infrastructure(
    records: &[InfrastructureRecord],
    window: &DateWindow,
) -> InfrastructureSummary {
    let selection = select_in_window(
        records,
        window,
        |r| r.created_at.as_deref(),
        UndatedPolicy::Include,
        "infrastructure item",
    );

    let rows: Vec<InfrastructureRow> = selection
        .retained
        .iter()
        .map(|(record, _)| InfrastructureRow {
            label: label_or_unknown(record.name.as_deref()),
            count: record.count.unwrap_or(0),
            kind: record.kind,
            category: label_or_unknown(record.category.as_deref()),
        })
        .collect();

    InfrastructureSummary {
        total_count: rows.iter().fold(0_u64, |total, r| total.saturating_add(r.count)),
        rows,
        undated: selection.undated,
        unparseable: selection.unparseable,
    }
}

#[cfg(test)]
mod tests {
    use housing_registry_models::GeometryKind;

    use super::*;
    use crate::parsing::parse_day;

    fn window(start: &str, end: &str) -> DateWindow {
        DateWindow::bounded(parse_day(start).unwrap(), parse_day(end).unwrap()).unwrap()
    }

    fn item(name: &str, created_at: Option<&str>, count: Option<u64>) -> InfrastructureRecord {
        InfrastructureRecord {
            name: Some(name.to_string()),
            created_at: created_at.map(ToString::to_string),
            kind: GeometryKind::Point,
            category: Some("Sanitation".to_string()),
            count,
        }
    }

    #[test]
    fn keeps_undated_items_outside_any_window() {
        let records = vec![
            item("Old well", None, Some(4)),
            item("New road", Some("2025-03-01"), Some(9)),
        ];
        let summary = summarize_infrastructure(&records, &window("2025-01-01", "2025-01-02"));
        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.rows[0].label, "Old well");
        assert_eq!(summary.total_count, 4);
        assert_eq!(summary.undated, 1);
    }

    #[test]
    fn skips_unparseable_dated_items() {
        let records = vec![item("Drain", Some("n/a"), Some(2))];
        let summary = summarize_infrastructure(&records, &DateWindow::UNBOUNDED);
        assert!(summary.rows.is_empty());
        assert_eq!(summary.unparseable, 1);
        assert_eq!(summary.total_count, 0);
    }

    #[test]
    fn fills_defaults_and_preserves_order() {
        let records = vec![
            InfrastructureRecord {
                name: None,
                created_at: Some("2025-01-02".to_string()),
                kind: GeometryKind::Line,
                category: Some("   ".to_string()),
                count: None,
            },
            item("Hydrant", Some("2025-01-01"), Some(3)),
            item("Lamp", None, Some(5)),
        ];
        let summary = summarize_infrastructure(&records, &window("2025-01-01", "2025-01-02"));
        let labels: Vec<&str> = summary.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["Unknown", "Hydrant", "Lamp"]);
        assert_eq!(summary.rows[0].category, "Unknown");
        assert_eq!(summary.rows[0].count, 0);
        assert_eq!(summary.rows[0].kind, GeometryKind::Line);
        assert_eq!(summary.total_count, 8);
    }

    #[test]
    fn total_count_saturates() {
        let records = vec![item("Dam", None, Some(u64::MAX)), item("Pump", None, Some(1))];
        let summary = summarize_infrastructure(&records, &DateWindow::UNBOUNDED);
        assert_eq!(summary.rows.len(), 2);
        assert_eq!(summary.total_count, u64::MAX);
    }

    #[test]
    fn empty_input_yields_empty_summary() {
        let summary = summarize_infrastructure(&[], &window("2025-01-01", "2025-01-02"));
        assert_eq!(summary, InfrastructureSummary::default());
    }
}
