//! Daily household series for the dashboard trend chart.

use std::collections::BTreeMap;

use housing_registry_models::HouseholdRecord;
use housing_registry_report_models::{DailySeries, DateWindow, TimeSeriesPoint, day_key};

use crate::ReportError;
use crate::window::{UndatedPolicy, enumerate_days, select_in_window};

/// Counts households per creation day over `window`.
///
/// Every day of the window gets a point, zero-filled, in ascending order.
/// Households outside the window or without a readable `createdAt` are
/// skipped; the latter are counted in [`DailySeries::unparseable`].
///
/// # Errors
///
/// Returns [`ReportError::UnboundedWindow`] if `window` has an open side.
pub fn build_daily_series(
    records: &[HouseholdRecord],
    window: &DateWindow,
) -> Result<DailySeries, ReportError> {
    let mut buckets: BTreeMap<_, u64> = enumerate_days(window)?
        .into_iter()
        .map(|day| (day, 0))
        .collect();

    let selection = select_in_window(
        records,
        window,
        |r| r.created_at.as_deref(),
        UndatedPolicy::Exclude,
        "household",
    );

    for day in selection.retained.iter().filter_map(|(_, day)| *day) {
        if let Some(count) = buckets.get_mut(&day) {
            *count += 1;
        }
    }

    Ok(DailySeries {
        points: buckets
            .into_iter()
            .map(|(day, count)| TimeSeriesPoint {
                period: day_key(day),
                count,
            })
            .collect(),
        unparseable: selection.unparseable,
    })
}
