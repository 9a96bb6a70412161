#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types for city-wide statistics and ward detail derivations.
//!
//! Values that cannot be computed over an empty collection are `Option`s
//! and serialize as `null`, never as a zero or `NaN` stand-in.

use serde::{Deserialize, Serialize};
use ward_aqi_aqi_models::{AqiCategory, Pollutant};

/// A ward reference (id + display name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WardRef {
    /// Ward identifier.
    pub id: String,
    /// Ward display name.
    pub name: String,
}

/// Whole-city statistics shown on the landing view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityStats {
    /// Number of wards in the dataset.
    pub total_wards: u64,
    /// Wards whose AQI classifies as severe.
    pub severe_count: u64,
    /// Mean AQI rounded to the nearest integer. `None` without readings.
    pub average_aqi: Option<u32>,
    /// First ward in load order with the lowest AQI. `None` without
    /// readings.
    pub cleanest_ward: Option<WardRef>,
}

/// Number of wards in a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// Category.
    pub category: AqiCategory,
    /// Number of wards.
    pub count: u64,
}

/// One pollutant's reading relative to its safe limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollutantBreakdown {
    /// Pollutant.
    pub pollutant: Pollutant,
    /// Chart label (e.g. "NO₂").
    pub label: String,
    /// Measured value.
    pub value: f64,
    /// Unit of measurement.
    pub unit: String,
    /// Safe limit in the same unit.
    pub safe_limit: f64,
    /// `value / safe_limit`.
    pub ratio: f64,
    /// Whole percent above the safe limit, `None` when within it.
    pub percent_above_limit: Option<u32>,
    /// Short status text (e.g. "35% above limit").
    pub status: String,
    /// Severity band of the ratio, used for bar coloring.
    pub band: AqiCategory,
}

impl PollutantBreakdown {
    /// Status text for a percentage above the safe limit.
    #[must_use]
    pub fn status_text(percent_above_limit: Option<u32>) -> String {
        percent_above_limit.map_or_else(
            || "Within safe limit".to_string(),
            |pct| format!("{pct}% above limit"),
        )
    }
}
