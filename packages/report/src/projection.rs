//! Flattens payload records into report tables.
//!
//! Projection does no aggregation or filtering of its own: callers pass
//! records that were already filtered. Missing values render as the
//! configured placeholder, never as an empty cell.

use housing_registry_models::{
    AreaRecord, HabitabilityStatus, HouseholdRecord, InfrastructureRecord, ReportPayload,
};
use housing_registry_report_models::{
    ReportProjection, ReportTable, ReportType, TableKind, day_key,
};

use crate::config::ReportConfig;
use crate::parsing::RecordDay;

struct Cells<'a> {
    placeholder: &'a str,
}

impl Cells<'_> {
    fn text(&self, value: Option<&str>) -> String {
        value
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(self.placeholder)
            .to_string()
    }

    fn number(&self, value: Option<u64>) -> String {
        value.map_or_else(|| self.placeholder.to_string(), |n| n.to_string())
    }

    fn status(&self, status: HabitabilityStatus) -> String {
        match status {
            HabitabilityStatus::Unknown => self.placeholder.to_string(),
            known => known.to_string(),
        }
    }

    /// Day key when readable, otherwise the raw text as recorded.
    fn survey_date(&self, raw: Option<&str>) -> String {
        match RecordDay::of(raw) {
            RecordDay::Day(day) => day_key(day),
            RecordDay::Unparseable => self.text(raw),
            RecordDay::Absent => self.placeholder.to_string(),
        }
    }

    fn household(&self, record: &HouseholdRecord) -> Vec<String> {
        vec![
            self.text(record.head_name.as_deref()),
            self.text(record.address_text.as_deref()),
            self.status(record.habitability_status),
            self.number(record.member_total),
            self.survey_date(record.created_at.as_deref()),
        ]
    }

    fn infrastructure(&self, record: &InfrastructureRecord) -> Vec<String> {
        vec![
            self.text(record.name.as_deref()),
            self.text(record.category.as_deref()),
            record.kind.to_string(),
            record.count.unwrap_or(0).to_string(),
        ]
    }

    fn area(&self, record: &AreaRecord) -> Vec<String> {
        vec![
            self.text(record.name.as_deref()),
            self.text(record.description.as_deref()),
            self.number(record.infrastructure_count),
        ]
    }

    fn table(&self, kind: TableKind, payload: &ReportPayload) -> ReportTable {
        let mut table = ReportTable::empty(kind);
        table.rows = match kind {
            TableKind::Household => payload.households.iter().map(|r| self.household(r)).collect(),
            TableKind::Infrastructure => payload
                .infrastructure
                .iter()
                .map(|r| self.infrastructure(r))
                .collect(),
            TableKind::Area => payload.areas.iter().map(|r| self.area(r)).collect(),
        };
        table
    }
}

/// Projects `payload` into the table(s) of `report_type`.
///
/// [`ReportType::Combined`] yields the three tables independently; rows are
/// never cross-referenced between them.
#[must_use]
pub fn project(
    report_type: ReportType,
    payload: &ReportPayload,
    config: &ReportConfig,
) -> ReportProjection {
    let cells = Cells {
        placeholder: &config.table.placeholder,
    };

    let projection = match report_type {
        ReportType::Household => ReportProjection::Household {
            table: cells.table(TableKind::Household, payload),
        },
        ReportType::Infrastructure => ReportProjection::Infrastructure {
            table: cells.table(TableKind::Infrastructure, payload),
        },
        ReportType::Area => ReportProjection::Area {
            table: cells.table(TableKind::Area, payload),
        },
        ReportType::Combined => ReportProjection::Combined {
            household: cells.table(TableKind::Household, payload),
            infrastructure: cells.table(TableKind::Infrastructure, payload),
            area: cells.table(TableKind::Area, payload),
        },
    };

    log::debug!(
        "Projected {report_type} report: {} row(s)",
        projection
            .tables()
            .iter()
            .map(|t| t.rows.len())
            .sum::<usize>()
    );

    projection
}
