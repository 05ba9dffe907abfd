#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Report and dashboard aggregation for the housing registry.
//!
//! Every function here is a pure computation over record lists that were
//! already fetched from the backend. Date windows are passed in explicitly,
//! one per chart, so independent charts never share filter state.
//!
//! Bad data is not an error: unparseable timestamps are skipped and
//! counted, invalid date inputs are ignored and reported as
//! [`WindowNotice`](housing_registry_report_models::WindowNotice)s. The only
//! errors are caller contract violations ([`ReportError`]) and configuration
//! problems ([`ConfigError`]).

pub mod classification;
pub mod config;
pub mod dashboard;
pub mod filter;
pub mod household;
pub mod infrastructure;
pub mod parsing;
pub mod projection;
pub mod window;

pub use classification::{summarize_demographics, summarize_habitability};
pub use config::{ConfigError, ReportConfig};
pub use dashboard::{DashboardWindows, RawWindow, build_dashboard};
pub use filter::{RecordFilter, retain_in_window};
pub use household::build_daily_series;
pub use infrastructure::summarize_infrastructure;
pub use projection::project;
pub use window::{enumerate_days, normalize, normalize_with_lookback};

use housing_registry_report_models::DateWindow;
use thiserror::Error;

/// Errors that can occur during report operations.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A day-by-day operation was given a window with an open side.
    #[error("Window must be bounded on both sides, got {window}")]
    UnboundedWindow {
        /// The offending window.
        window: DateWindow,
    },
}
