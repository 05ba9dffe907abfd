//! Dashboard composition: every chart over its own window.

use chrono::NaiveDate;
use housing_registry_models::ReportPayload;
use housing_registry_report_models::{ChartNotice, Dashboard, DashboardChart, DateWindow};
use serde::{Deserialize, Serialize};

use crate::ReportError;
use crate::classification::{summarize_demographics, summarize_habitability};
use crate::config::ReportConfig;
use crate::household::build_daily_series;
use crate::infrastructure::summarize_infrastructure;
use crate::window::normalize_with_lookback;

/// Start/end inputs of one chart's date filter, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWindow {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RawWindow {
    #[must_use]
    pub fn new(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            start: start.map(ToString::to_string),
            end: end.map(ToString::to_string),
        }
    }
}

/// Per-chart window inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardWindows {
    pub series: RawWindow,
    pub habitability: RawWindow,
    pub demographics: RawWindow,
    pub infrastructure: RawWindow,
}

impl DashboardWindows {
    /// The same inputs for every chart.
    #[must_use]
    pub fn uniform(window: &RawWindow) -> Self {
        Self {
            series: window.clone(),
            habitability: window.clone(),
            demographics: window.clone(),
            infrastructure: window.clone(),
        }
    }
}

fn resolve(
    chart: DashboardChart,
    raw: &RawWindow,
    today: NaiveDate,
    config: &ReportConfig,
    notices: &mut Vec<ChartNotice>,
) -> DateWindow {
    let normalized = normalize_with_lookback(
        raw.start.as_deref(),
        raw.end.as_deref(),
        today,
        config.window.default_days,
    );
    notices.extend(
        normalized
            .notices
            .into_iter()
            .map(|notice| ChartNotice { chart, notice }),
    );
    normalized.window
}

/// Builds every dashboard chart from one payload.
///
/// Each chart's window is normalized on its own, so narrowing one chart
/// never changes another.
///
/// # Errors
///
/// Returns [`ReportError`] only if a normalized window is unbounded, which
/// normalization never produces.
pub fn build_dashboard(
    payload: &ReportPayload,
    windows: &DashboardWindows,
    today: NaiveDate,
    config: &ReportConfig,
) -> Result<Dashboard, ReportError> {
    let mut notices = Vec::new();

    let series_window = resolve(
        DashboardChart::DailySeries,
        &windows.series,
        today,
        config,
        &mut notices,
    );
    let habitability_window = resolve(
        DashboardChart::Habitability,
        &windows.habitability,
        today,
        config,
        &mut notices,
    );
    let demographics_window = resolve(
        DashboardChart::Demographics,
        &windows.demographics,
        today,
        config,
        &mut notices,
    );
    let infrastructure_window = resolve(
        DashboardChart::Infrastructure,
        &windows.infrastructure,
        today,
        config,
        &mut notices,
    );

    let series = build_daily_series(&payload.households, &series_window)?;
    let habitability = summarize_habitability(&payload.households, &habitability_window);
    let demographics = summarize_demographics(&payload.households, &demographics_window);
    let infrastructure = summarize_infrastructure(&payload.infrastructure, &infrastructure_window);

    log::info!(
        "Dashboard for {today}: {} household(s) in series, {} in habitability window, {} infrastructure row(s)",
        series.total(),
        habitability.total_in_window,
        infrastructure.rows.len()
    );

    Ok(Dashboard {
        today,
        series_window,
        series,
        habitability_window,
        habitable_ratio: habitability.habitable_ratio(),
        habitability,
        demographics_window,
        demographics,
        infrastructure_window,
        infrastructure,
        notices,
    })
}

#[cfg(test)]
mod tests {
    use housing_registry_models::{
        GeometryKind, HabitabilityStatus, HouseholdRecord, InfrastructureRecord,
    };
    use housing_registry_report_models::WindowNotice;

    use super::*;
    use crate::parsing::parse_day;

    fn payload() -> ReportPayload {
        let household = |created_at: &str, status| HouseholdRecord {
            created_at: Some(created_at.to_string()),
            habitability_status: status,
            male_count: Some(1),
            female_count: Some(1),
            member_total: Some(2),
            ..HouseholdRecord::default()
        };
        ReportPayload {
            households: vec![
                household("2025-06-14", HabitabilityStatus::Habitable),
                household("2025-06-01", HabitabilityStatus::NotHabitable),
                household("2025-01-01", HabitabilityStatus::Habitable),
            ],
            infrastructure: vec![InfrastructureRecord {
                name: Some("Well".to_string()),
                created_at: None,
                kind: GeometryKind::Point,
                category: Some("Water".to_string()),
                count: Some(2),
            }],
            areas: Vec::new(),
        }
    }

    #[test]
    fn charts_use_their_own_windows() {
        let today = parse_day("2025-06-15").unwrap();
        let windows = DashboardWindows {
            habitability: RawWindow::new(Some("2025-01-01"), None),
            ..DashboardWindows::default()
        };
        let dashboard =
            build_dashboard(&payload(), &windows, today, &ReportConfig::default()).unwrap();

        assert_eq!(dashboard.series.len(), 11);
        assert_eq!(dashboard.series.total(), 1);
        assert_eq!(dashboard.habitability.habitable_count, 2);
        assert_eq!(dashboard.habitability.not_habitable_count, 1);
        assert_eq!(dashboard.demographics.total_members, 2);
        assert_eq!(dashboard.infrastructure.total_count, 2);
        assert!(dashboard.notices.is_empty());
    }

    #[test]
    fn notices_are_tagged_with_their_chart() {
        let today = parse_day("2025-06-15").unwrap();
        let windows = DashboardWindows {
            demographics: RawWindow::new(Some("whenever"), None),
            ..DashboardWindows::default()
        };
        let dashboard =
            build_dashboard(&payload(), &windows, today, &ReportConfig::default()).unwrap();
        assert_eq!(dashboard.notices.len(), 1);
        assert_eq!(dashboard.notices[0].chart, DashboardChart::Demographics);
        assert!(matches!(
            dashboard.notices[0].notice,
            WindowNotice::InvalidDateIgnored { .. }
        ));
    }

    #[test]
    fn uniform_windows_follow_configured_lookback() {
        let today = parse_day("2025-06-15").unwrap();
        let mut config = ReportConfig::default();
        config.window.default_days = 200;
        let dashboard = build_dashboard(
            &payload(),
            &DashboardWindows::uniform(&RawWindow::default()),
            today,
            &config,
        )
        .unwrap();
        assert_eq!(dashboard.series.total(), 3);
        assert_eq!(dashboard.habitable_ratio, Some(2.0 / 3.0));
    }
}
