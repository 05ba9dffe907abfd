#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Record types for the housing registry.
//!
//! These are the shapes returned by the backend report-data endpoint:
//! households, infrastructure (PSU) items and settlement areas. Source data
//! is loosely typed, so most fields are optional and every consumer applies
//! an explicit default when a value is absent.

use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Label substituted for absent names and categories.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Habitability classification of a dwelling.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum HabitabilityStatus {
    /// Dwelling meets habitability criteria (RLH).
    #[strum(to_string = "HABITABLE", serialize = "RLH")]
    Habitable,
    /// Dwelling fails habitability criteria (RTLH).
    #[strum(to_string = "NOT_HABITABLE", serialize = "RTLH")]
    NotHabitable,
    /// Not yet assessed, or a value the registry does not recognise.
    #[default]
    #[strum(to_string = "UNKNOWN")]
    Unknown,
}

impl HabitabilityStatus {
    /// Classifies a raw status label.
    ///
    /// Spaces and hyphens are treated as underscores, so `"not habitable"`
    /// and `"Not-Habitable"` both classify as [`Self::NotHabitable`].
    /// Anything unrecognised is [`Self::Unknown`].
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        raw.trim()
            .replace([' ', '-'], "_")
            .parse()
            .unwrap_or(Self::Unknown)
    }
}

impl<'de> Deserialize<'de> for HabitabilityStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or(Self::Unknown, Self::classify))
    }
}

/// Geometry style an infrastructure item is drawn with on the map.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum GeometryKind {
    /// Polyline geometry (roads, drainage, pipes).
    #[strum(to_string = "LINE", serialize = "POLYLINE")]
    Line,
    /// Point geometry (facilities, hydrants, lamps).
    #[strum(to_string = "POINT", serialize = "MARKER")]
    Point,
}

impl<'de> Deserialize<'de> for GeometryKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim().parse().map_err(|_| {
            serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(&raw),
                &"one of LINE, POLYLINE, POINT, MARKER",
            )
        })
    }
}

/// A surveyed household.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdRecord {
    /// Name of the head of household.
    #[serde(default)]
    pub head_name: Option<String>,
    /// Free-text street address.
    #[serde(default)]
    pub address_text: Option<String>,
    /// District the household belongs to.
    #[serde(default)]
    pub district: Option<String>,
    /// Village the household belongs to.
    #[serde(default)]
    pub village: Option<String>,
    /// Creation/survey timestamp as sent by the backend (unparsed).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Habitability classification. Absent or unrecognised values are
    /// [`HabitabilityStatus::Unknown`].
    #[serde(default)]
    pub habitability_status: HabitabilityStatus,
    #[serde(default)]
    pub male_count: Option<u64>,
    #[serde(default)]
    pub female_count: Option<u64>,
    /// Total members as recorded. Not required to equal
    /// `male_count + female_count`.
    #[serde(default)]
    pub member_total: Option<u64>,
}

/// An infrastructure (PSU) item tracked within a settlement area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureRecord {
    #[serde(default)]
    pub name: Option<String>,
    /// Creation timestamp. Undated items predate tracking.
    #[serde(default)]
    pub created_at: Option<String>,
    pub kind: GeometryKind,
    #[serde(default)]
    pub category: Option<String>,
    /// Quantity attributed to this item (segments, units, ...).
    #[serde(default)]
    pub count: Option<u64>,
}

/// A settlement area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    /// Number of infrastructure items recorded in this area.
    #[serde(default)]
    pub infrastructure_count: Option<u64>,
}

/// Everything one report request works over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    #[serde(default)]
    pub households: Vec<HouseholdRecord>,
    #[serde(default)]
    pub infrastructure: Vec<InfrastructureRecord>,
    #[serde(default)]
    pub areas: Vec<AreaRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_status_aliases() {
        assert_eq!(
            HabitabilityStatus::classify("HABITABLE"),
            HabitabilityStatus::Habitable
        );
        assert_eq!(
            HabitabilityStatus::classify("rlh"),
            HabitabilityStatus::Habitable
        );
        assert_eq!(
            HabitabilityStatus::classify("RTLH"),
            HabitabilityStatus::NotHabitable
        );
        assert_eq!(
            HabitabilityStatus::classify(" not habitable "),
            HabitabilityStatus::NotHabitable
        );
        assert_eq!(
            HabitabilityStatus::classify("pending review"),
            HabitabilityStatus::Unknown
        );
    }

    #[test]
    fn status_displays_canonical_name() {
        assert_eq!(HabitabilityStatus::NotHabitable.to_string(), "NOT_HABITABLE");
        assert_eq!(GeometryKind::Line.to_string(), "LINE");
    }

    #[test]
    fn household_defaults_missing_fields() {
        let record: HouseholdRecord = serde_json::from_str(
            r#"{"headName": "Siti", "habitabilityStatus": null, "maleCount": 2}"#,
        )
        .unwrap();
        assert_eq!(record.head_name.as_deref(), Some("Siti"));
        assert_eq!(record.habitability_status, HabitabilityStatus::Unknown);
        assert_eq!(record.male_count, Some(2));
        assert_eq!(record.female_count, None);
        assert_eq!(record.created_at, None);
    }

    #[test]
    fn infrastructure_kind_accepts_map_styles() {
        let record: InfrastructureRecord =
            serde_json::from_str(r#"{"kind": "polyline", "count": 3}"#).unwrap();
        assert_eq!(record.kind, GeometryKind::Line);

        let record: InfrastructureRecord =
            serde_json::from_str(r#"{"kind": "Marker"}"#).unwrap();
        assert_eq!(record.kind, GeometryKind::Point);

        assert!(serde_json::from_str::<InfrastructureRecord>(r#"{"kind": "polygon"}"#).is_err());
    }

    #[test]
    fn payload_sections_default_to_empty() {
        let payload: ReportPayload = serde_json::from_str(r#"{"areas": [{"name": "RW 01"}]}"#).unwrap();
        assert!(payload.households.is_empty());
        assert!(payload.infrastructure.is_empty());
        assert_eq!(payload.areas.len(), 1);
    }
}
