//! Date window normalization and day enumeration.
//!
//! Raw start/end inputs come straight from chart filter controls, so they
//! may be missing, blank, malformed, in the future or in the wrong order.
//! [`normalize`] always produces a bounded window and records each
//! adjustment it made as a [`WindowNotice`].

use chrono::{Days, NaiveDate};
use housing_registry_report_models::{DateWindow, NormalizedWindow, WindowBound, WindowNotice};

use crate::ReportError;
use crate::parsing::{RecordDay, parse_day};

/// Look-back used for the start of a window when none is supplied.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 10;

/// Normalizes raw start/end inputs against `today` with the default
/// look-back of [`DEFAULT_LOOKBACK_DAYS`].
#[must_use]
pub fn normalize(
    raw_start: Option<&str>,
    raw_end: Option<&str>,
    today: NaiveDate,
) -> NormalizedWindow {
    normalize_with_lookback(raw_start, raw_end, today, DEFAULT_LOOKBACK_DAYS)
}

/// Normalizes raw start/end inputs against `today`.
///
/// * A missing, blank or invalid end is `today`; an end after `today` is
///   clamped to `today`.
/// * A missing, blank or invalid start is `lookback_days` before `today`,
///   pulled back to the end if that would invert the window.
/// * A supplied start after the end moves the end up to the start, so
///   choosing a later start never empties the window.
///
/// Invalid inputs never fail; they are ignored and reported in
/// [`NormalizedWindow::notices`].
#[must_use]
pub fn normalize_with_lookback(
    raw_start: Option<&str>,
    raw_end: Option<&str>,
    today: NaiveDate,
    lookback_days: u32,
) -> NormalizedWindow {
    let mut notices = Vec::new();
    let requested_start = parse_bound(raw_start, WindowBound::Start, &mut notices);
    let requested_end = parse_bound(raw_end, WindowBound::End, &mut notices);

    let mut end = match requested_end {
        Some(requested) if requested > today => {
            notices.push(WindowNotice::EndClampedToToday { requested, today });
            today
        }
        Some(requested) => requested,
        None => today,
    };

    let start = if let Some(start) = requested_start {
        if start > end {
            notices.push(WindowNotice::EndAdvancedToStart {
                previous_end: end,
                start,
            });
            end = start;
        }
        start
    } else {
        today
            .checked_sub_days(Days::new(u64::from(lookback_days)))
            .unwrap_or(NaiveDate::MIN)
            .min(end)
    };

    for notice in &notices {
        match notice {
            WindowNotice::InvalidDateIgnored { .. } => log::warn!("{notice}"),
            _ => log::debug!("{notice}"),
        }
    }

    NormalizedWindow {
        window: DateWindow::spanning(start, end),
        notices,
    }
}

fn parse_bound(
    raw: Option<&str>,
    bound: WindowBound,
    notices: &mut Vec<WindowNotice>,
) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    let parsed = parse_day(raw);
    if parsed.is_none() {
        notices.push(WindowNotice::InvalidDateIgnored {
            bound,
            input: raw.to_string(),
        });
    }
    parsed
}

/// Lists every calendar day of `window`, ascending, both ends included.
///
/// # Errors
///
/// Returns [`ReportError::UnboundedWindow`] if either side of the window is
/// open. Windows from [`normalize`] are always bounded.
pub fn enumerate_days(window: &DateWindow) -> Result<Vec<NaiveDate>, ReportError> {
    let (start, end) = window
        .bounds()
        .ok_or(ReportError::UnboundedWindow { window: *window })?;

    Ok(start.iter_days().take_while(|day| *day <= end).collect())
}

/// Whether undated records survive window filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UndatedPolicy {
    Exclude,
    Include,
}

/// Records that survived window filtering, in input order, with the day
/// each one falls on (`None` for retained undated records).
pub(crate) struct Selection<'a, T> {
    pub retained: Vec<(&'a T, Option<NaiveDate>)>,
    pub undated: u64,
    pub unparseable: u64,
}

/// Filters `records` to those inside `window`.
///
/// Unparseable timestamps are always skipped. Absent timestamps are kept
/// or skipped according to `undated`; skipped ones count as unparseable.
pub(crate) fn select_in_window<'a, T>(
    records: &'a [T],
    window: &DateWindow,
    created_at: impl Fn(&T) -> Option<&str>,
    undated: UndatedPolicy,
    kind: &str,
) -> Selection<'a, T> {
    let mut selection = Selection {
        retained: Vec::with_capacity(records.len()),
        undated: 0,
        unparseable: 0,
    };

    for (index, record) in records.iter().enumerate() {
        match RecordDay::of(created_at(record)) {
            RecordDay::Day(day) => {
                if window.contains(day) {
                    selection.retained.push((record, Some(day)));
                }
            }
            RecordDay::Absent if undated == UndatedPolicy::Include => {
                selection.undated += 1;
                selection.retained.push((record, None));
            }
            RecordDay::Absent => {
                log::debug!("Skipping {kind} #{index}: no createdAt");
                selection.unparseable += 1;
            }
            RecordDay::Unparseable => {
                log::debug!(
                    "Skipping {kind} #{index}: unparseable createdAt '{}'",
                    created_at(record).unwrap_or_default()
                );
                selection.unparseable += 1;
            }
        }
    }

    selection
}
