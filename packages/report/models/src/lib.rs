#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types for the housing registry report engine.
//!
//! Everything here is plain data handed to chart and table renderers:
//! the [`DateWindow`] a chart filters by, the zero-filled [`DailySeries`],
//! classification and demographic tallies, infrastructure summaries and
//! projected report tables.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use housing_registry_models::GeometryKind;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// `strftime` format of a day key (`2025-06-01`).
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Formats a calendar day as a day key.
#[must_use]
pub fn day_key(day: NaiveDate) -> String {
    day.format(DAY_KEY_FORMAT).to_string()
}

/// Error returned when a [`DateWindow`] would start after it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvertedWindowError {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl std::fmt::Display for InvertedWindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "window start {} is after window end {}",
            self.start, self.end
        )
    }
}

impl std::error::Error for InvertedWindowError {}

/// An inclusive range of calendar days.
///
/// A missing bound is unbounded on that side. Bounds are whole days: a
/// timestamp anywhere inside the end day is inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateWindow {
    /// A window with no bounds on either side.
    pub const UNBOUNDED: Self = Self {
        start: None,
        end: None,
    };

    /// Creates a window.
    ///
    /// # Errors
    ///
    /// Returns [`InvertedWindowError`] if both bounds are present and
    /// `start > end`.
    pub fn new(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, InvertedWindowError> {
        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            return Err(InvertedWindowError { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a window bounded on both sides.
    ///
    /// # Errors
    ///
    /// Returns [`InvertedWindowError`] if `start > end`.
    pub fn bounded(start: NaiveDate, end: NaiveDate) -> Result<Self, InvertedWindowError> {
        Self::new(Some(start), Some(end))
    }

    /// Creates a window spanning two days, whichever order they come in.
    #[must_use]
    pub fn spanning(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            start: Some(a.min(b)),
            end: Some(a.max(b)),
        }
    }

    #[must_use]
    pub const fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Both bounds, if the window is bounded on both sides.
    #[must_use]
    pub const fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// First instant of the start day.
    #[must_use]
    pub fn start_of_day(&self) -> Option<NaiveDateTime> {
        self.start.map(|d| d.and_time(NaiveTime::MIN))
    }

    /// Last representable instant of the end day.
    #[must_use]
    pub fn end_of_day(&self) -> Option<NaiveDateTime> {
        self.end.and_then(|d| {
            NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).map(|t| d.and_time(t))
        })
    }

    /// Returns `true` if `day` is inside the window.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start.is_none_or(|start| day >= start) && self.end.is_none_or(|end| day <= end)
    }

    /// Number of days covered, if bounded.
    #[must_use]
    pub fn day_count(&self) -> Option<u64> {
        self.bounds()
            .and_then(|(start, end)| u64::try_from((end - start).num_days() + 1).ok())
    }
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.start, self.end) {
            (Some(s), Some(e)) => write!(f, "{s} to {e}"),
            (Some(s), None) => write!(f, "since {s}"),
            (None, Some(e)) => write!(f, "through {e}"),
            (None, None) => write!(f, "all time"),
        }
    }
}

/// Which side of a window a raw date input was meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WindowBound {
    Start,
    End,
}

/// A non-fatal adjustment made while normalizing a date window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "notice")]
pub enum WindowNotice {
    /// A supplied date could not be parsed and was treated as absent.
    #[serde(rename_all = "camelCase")]
    InvalidDateIgnored {
        bound: WindowBound,
        input: String,
    },
    /// The requested end was after today and was pulled back.
    #[serde(rename_all = "camelCase")]
    EndClampedToToday {
        requested: NaiveDate,
        today: NaiveDate,
    },
    /// The start was after the end, so the end was moved up to the start.
    #[serde(rename_all = "camelCase")]
    EndAdvancedToStart {
        previous_end: NaiveDate,
        start: NaiveDate,
    },
}

impl std::fmt::Display for WindowNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateIgnored { bound, input } => {
                write!(f, "ignored invalid {bound} date '{input}'")
            }
            Self::EndClampedToToday { requested, today } => {
                write!(f, "end date {requested} is in the future, using {today}")
            }
            Self::EndAdvancedToStart {
                previous_end,
                start,
            } => write!(f, "start {start} is after end {previous_end}, end moved to {start}"),
        }
    }
}

/// A window produced from raw user input, with everything that was
/// adjusted along the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedWindow {
    pub window: DateWindow,
    pub notices: Vec<WindowNotice>,
}

/// A time-series data point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// Day key (`YYYY-MM-DD`).
    pub period: String,
    pub count: u64,
}

/// Household counts per day, one point for every day of the window in
/// ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySeries {
    pub points: Vec<TimeSeriesPoint>,
    /// Records skipped because their timestamp could not be read.
    pub unparseable: u64,
}

impl DailySeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of all daily counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.points.iter().map(|p| p.count).sum()
    }
}

/// Habitable / not-habitable tallies over a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitabilitySummary {
    pub habitable_count: u64,
    pub not_habitable_count: u64,
    /// Every household in the window, including unclassified ones.
    pub total_in_window: u64,
    pub unparseable: u64,
}

impl HabitabilitySummary {
    /// Share of classified households that are habitable.
    #[must_use]
    pub fn habitable_ratio(&self) -> Option<f64> {
        let classified = self.habitable_count + self.not_habitable_count;
        if classified == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        Some(self.habitable_count as f64 / classified as f64)
    }
}

/// Member totals over a window. Each field is summed on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicSummary {
    pub total_male: u64,
    pub total_female: u64,
    pub total_members: u64,
    pub households_in_window: u64,
    pub unparseable: u64,
}

/// One infrastructure item as shown in the PSU chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureRow {
    pub label: String,
    pub count: u64,
    pub kind: GeometryKind,
    pub category: String,
}

/// Infrastructure items retained by a window, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureSummary {
    pub rows: Vec<InfrastructureRow>,
    pub total_count: u64,
    /// Retained rows that carried no timestamp.
    pub undated: u64,
    pub unparseable: u64,
}

/// The report a user asked for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ReportType {
    Household,
    Infrastructure,
    Area,
    /// All three tables side by side.
    Combined,
}

/// A single tabular row-set with a fixed column schema.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TableKind {
    Household,
    Infrastructure,
    Area,
}

impl TableKind {
    #[must_use]
    pub const fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Household => &[
                "headName",
                "addressText",
                "habitabilityStatus",
                "memberTotal",
                "surveyDate",
            ],
            Self::Infrastructure => &["name", "category", "kind", "count"],
            Self::Area => &["name", "description", "infrastructureCount"],
        }
    }
}

/// Rows rendered as display strings, one cell per column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTable {
    pub kind: TableKind,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    /// An empty table with the column schema of `kind`.
    #[must_use]
    pub fn empty(kind: TableKind) -> Self {
        Self {
            kind,
            columns: kind.columns().iter().map(|c| (*c).to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

/// Output of projecting a payload for a [`ReportType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "reportType")]
pub enum ReportProjection {
    #[serde(rename = "HOUSEHOLD")]
    Household { table: ReportTable },
    #[serde(rename = "INFRASTRUCTURE")]
    Infrastructure { table: ReportTable },
    #[serde(rename = "AREA")]
    Area { table: ReportTable },
    /// Independent row-sets. Nothing is joined across them.
    #[serde(rename = "COMBINED")]
    Combined {
        household: ReportTable,
        infrastructure: ReportTable,
        area: ReportTable,
    },
}

impl ReportProjection {
    #[must_use]
    pub const fn report_type(&self) -> ReportType {
        match self {
            Self::Household { .. } => ReportType::Household,
            Self::Infrastructure { .. } => ReportType::Infrastructure,
            Self::Area { .. } => ReportType::Area,
            Self::Combined { .. } => ReportType::Combined,
        }
    }

    /// All tables in display order.
    #[must_use]
    pub fn tables(&self) -> Vec<&ReportTable> {
        match self {
            Self::Household { table } | Self::Infrastructure { table } | Self::Area { table } => {
                vec![table]
            }
            Self::Combined {
                household,
                infrastructure,
                area,
            } => vec![household, infrastructure, area],
        }
    }
}

/// Dashboard charts that each hold their own window.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DashboardChart {
    DailySeries,
    Habitability,
    Demographics,
    Infrastructure,
}

/// A [`WindowNotice`] raised while normalizing one chart's window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartNotice {
    pub chart: DashboardChart,
    #[serde(flatten)]
    pub notice: WindowNotice,
}

/// Every dashboard chart, each computed over its own window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub today: NaiveDate,
    pub series_window: DateWindow,
    pub series: DailySeries,
    pub habitability_window: DateWindow,
    pub habitability: HabitabilitySummary,
    pub habitable_ratio: Option<f64>,
    pub demographics_window: DateWindow,
    pub demographics: DemographicSummary,
    pub infrastructure_window: DateWindow,
    pub infrastructure: InfrastructureSummary,
    pub notices: Vec<ChartNotice>,
}
