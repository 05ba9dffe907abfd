//! Habitability (RLH/RTLH) and demographic tallies.
//!
//! Each summary takes its own window, independent of any other chart.

use housing_registry_models::{HabitabilityStatus, HouseholdRecord};
use housing_registry_report_models::{DateWindow, DemographicSummary, HabitabilitySummary};

use crate::window::{UndatedPolicy, select_in_window};

/// Tallies habitable and not-habitable households created inside `window`.
///
/// Households with an [`HabitabilityStatus::Unknown`] status fall in
/// neither tally but still count toward
/// [`HabitabilitySummary::total_in_window`].
#[must_use]
pub fn summarize_habitability(
    records: &[HouseholdRecord],
    window: &DateWindow,
) -> HabitabilitySummary {
    let selection = select_in_window(
        records,
        window,
        |r| r.created_at.as_deref(),
        UndatedPolicy::Exclude,
        "household",
    );

    let mut summary = HabitabilitySummary {
        unparseable: selection.unparseable,
        ..HabitabilitySummary::default()
    };

    for (record, _) in &selection.retained {
        summary.total_in_window += 1;
        match record.habitability_status {
            HabitabilityStatus::Habitable => summary.habitable_count += 1,
            HabitabilityStatus::NotHabitable => summary.not_habitable_count += 1,
            HabitabilityStatus::Unknown => {}
        }
    }

    summary
}

/// Sums male, female and total member counts of households created inside
/// `window`.
///
/// The three fields are summed independently; missing values count as 0.
#[must_use]
pub fn summarize_demographics(
    records: &[HouseholdRecord],
    window: &DateWindow,
) -> DemographicSummary {
    let selection = select_in_window(
        records,
        window,
        |r| r.created_at.as_deref(),
        UndatedPolicy::Exclude,
        "household",
    );

    selection.retained.iter().fold(
        DemographicSummary {
            unparseable: selection.unparseable,
            ..DemographicSummary::default()
        },
        |mut summary, (record, _)| {
            summary.total_male = summary
                .total_male
                .saturating_add(record.male_count.unwrap_or(0));
            summary.total_female = summary
                .total_female
                .saturating_add(record.female_count.unwrap_or(0));
            summary.total_members = summary
                .total_members
                .saturating_add(record.member_total.unwrap_or(0));
            summary.households_in_window += 1;
            summary
        },
    )
}
