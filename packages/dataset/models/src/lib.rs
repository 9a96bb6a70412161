#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Record types for the bundled ward air-quality dataset.
//!
//! These types mirror the JSON fixture schema (camelCase field names) and
//! are deserialized once at startup. Everything here is read-only after
//! load except [`Suggestion`], which is created at runtime.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use ward_aqi_aqi_models::{AqiCategory, Pollutant};

// ---------------------------------------------------------------------------
// Wards
// ---------------------------------------------------------------------------

/// A geographic point. Serialized as a `[latitude, longitude]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl From<[f64; 2]> for Coordinates {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.latitude, c.longitude]
    }
}

impl Coordinates {
    /// Whether both components are finite and inside the valid
    /// latitude/longitude ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// An administrative city ward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ward {
    /// Stable ward identifier (e.g. "ward-001").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Zone the ward belongs to (e.g. "Central Delhi").
    pub zone: String,
    /// Resident population.
    pub population: u64,
    /// Area in square kilometres.
    pub area: f64,
    /// Ward centroid.
    pub coordinates: Coordinates,
}

// ---------------------------------------------------------------------------
// Pollution levels
// ---------------------------------------------------------------------------

/// A single pollutant measurement with its safe limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollutantReading {
    /// Measured concentration.
    pub value: f64,
    /// Unit of measurement (e.g. "µg/m³").
    pub unit: String,
    /// Safe limit in the same unit.
    pub safe_limit: f64,
}

impl PollutantReading {
    /// Ratio of the measured value to the safe limit.
    #[must_use]
    pub fn exceedance_ratio(&self) -> f64 {
        self.value / self.safe_limit
    }
}

/// The fixed set of five pollutant readings attached to every ward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutantReadings {
    /// Fine particulate matter.
    pub pm25: PollutantReading,
    /// Coarse particulate matter.
    pub pm10: PollutantReading,
    /// Nitrogen dioxide.
    pub no2: PollutantReading,
    /// Sulphur dioxide.
    pub so2: PollutantReading,
    /// Ozone.
    pub o3: PollutantReading,
}

impl PollutantReadings {
    /// Returns the reading for `pollutant`.
    #[must_use]
    pub const fn get(&self, pollutant: Pollutant) -> &PollutantReading {
        match pollutant {
            Pollutant::Pm25 => &self.pm25,
            Pollutant::Pm10 => &self.pm10,
            Pollutant::No2 => &self.no2,
            Pollutant::So2 => &self.so2,
            Pollutant::O3 => &self.o3,
        }
    }

    /// Iterates readings in [`Pollutant::all`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, &PollutantReading)> {
        Pollutant::all().iter().map(|p| (*p, self.get(*p)))
    }
}

/// Current air quality for a ward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollutionLevel {
    /// Current AQI reading.
    pub aqi: u32,
    /// Stored category. Must equal `AqiCategory::classify(aqi)`.
    pub category: AqiCategory,
    /// Pollutant contributing most to the current reading.
    pub dominant_pollutant: Pollutant,
    /// When the reading was taken.
    pub last_updated: DateTime<Utc>,
    /// Individual pollutant readings.
    pub pollutants: PollutantReadings,
}

impl PollutionLevel {
    /// Category derived from the AQI reading, ignoring the stored value.
    #[must_use]
    pub const fn classified_category(&self) -> AqiCategory {
        AqiCategory::classify(self.aqi)
    }

    /// Whether the stored category agrees with the AQI reading.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.category == self.classified_category()
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// A contributor to a ward's pollution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollutionSource {
    /// Source name (e.g. "Vehicular Traffic").
    pub source: String,
    /// Share of pollution attributed to this source, in percent (0-100).
    pub contribution: f64,
    /// Short explanation.
    pub description: String,
}

// ---------------------------------------------------------------------------
// Trends and forecasts
// ---------------------------------------------------------------------------

/// A daily trend point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTrendPoint {
    /// Calendar day.
    pub date: NaiveDate,
    /// AQI on that day.
    pub aqi: u32,
}

/// A monthly trend point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTrendPoint {
    /// Month label (e.g. "Jan").
    pub month: String,
    /// Average AQI for the month.
    pub aqi: u32,
}

/// A yearly trend point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyTrendPoint {
    /// Year label (e.g. "2021").
    pub year: String,
    /// Average AQI for the year.
    pub aqi: u32,
}

/// Historical AQI series for a ward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendData {
    /// Recent daily readings.
    pub daily: Vec<DailyTrendPoint>,
    /// Recent monthly averages.
    pub monthly: Vec<MonthlyTrendPoint>,
    /// Yearly averages.
    pub yearly: Vec<YearlyTrendPoint>,
}

/// A single forecast day with its confidence band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Forecast day.
    pub date: NaiveDate,
    /// Predicted AQI.
    pub aqi: u32,
    /// Lower bound of the band.
    pub lower: u32,
    /// Upper bound of the band.
    pub upper: u32,
}

impl ForecastPoint {
    /// Whether `lower <= aqi <= upper`.
    #[must_use]
    pub const fn band_encloses_value(&self) -> bool {
        self.lower <= self.aqi && self.aqi <= self.upper
    }
}

/// A short-range AQI forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Forecast points in date order.
    pub forecast: Vec<ForecastPoint>,
    /// Model confidence in `0.0..=1.0`.
    pub confidence: f64,
    /// Free-text description of how the forecast was produced.
    pub methodology: String,
}

impl Prediction {
    /// Confidence as a whole percentage.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

/// Recommended citizen actions for a pollutant, grouped by scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitizenAction {
    /// Personal protection measures.
    pub personal: Vec<String>,
    /// Daily behavior changes.
    pub daily: Vec<String>,
    /// Collective community efforts.
    pub community: Vec<String>,
}

/// A ward-specific policy recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Problem being addressed.
    pub problem: String,
    /// Proposed policy.
    pub policy: String,
    /// Details of the policy.
    pub description: String,
    /// Expected impact.
    pub impact: String,
}

/// Policy fixture value: a ward may carry a single policy object or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicyEntry {
    /// A single policy object.
    One(Policy),
    /// A list of policies.
    Many(Vec<Policy>),
}

impl PolicyEntry {
    /// Normalizes to a list.
    #[must_use]
    pub fn into_vec(self) -> Vec<Policy> {
        match self {
            Self::One(policy) => vec![policy],
            Self::Many(policies) => policies,
        }
    }
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

/// Issue category a citizen files a suggestion under.
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
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum SuggestionCategory {
    /// Traffic and transport
    #[serde(rename = "Traffic & Transport")]
    #[strum(serialize = "Traffic & Transport")]
    TrafficTransport,
    /// Construction activity
    #[serde(rename = "Construction")]
    #[strum(serialize = "Construction")]
    Construction,
    /// Industrial emissions
    #[serde(rename = "Industrial")]
    #[strum(serialize = "Industrial")]
    Industrial,
    /// Waste handling and burning
    #[serde(rename = "Waste Management")]
    #[strum(serialize = "Waste Management")]
    WasteManagement,
    /// Parks and greenery
    #[serde(rename = "Green Spaces")]
    #[strum(serialize = "Green Spaces")]
    GreenSpaces,
    /// Policy changes
    #[serde(rename = "Policy Improvement")]
    #[strum(serialize = "Policy Improvement")]
    PolicyImprovement,
    /// Anything else
    #[serde(rename = "Other")]
    #[strum(serialize = "Other")]
    Other,
}

impl SuggestionCategory {
    /// Returns all variants in form order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::TrafficTransport,
            Self::Construction,
            Self::Industrial,
            Self::WasteManagement,
            Self::GreenSpaces,
            Self::PolicyImprovement,
            Self::Other,
        ]
    }
}

/// A citizen suggestion submitted for a ward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Unique suggestion identifier.
    pub id: String,
    /// Identifier of the ward the suggestion belongs to.
    pub ward_id: String,
    /// Ward display name at submission time.
    pub ward: String,
    /// Issue category.
    pub category: SuggestionCategory,
    /// Trimmed free-text description.
    pub description: String,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}
