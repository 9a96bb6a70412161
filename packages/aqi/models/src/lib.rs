#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! AQI category taxonomy and classification thresholds.
//!
//! This crate defines the five ordered air quality bands used across the
//! whole workspace, the threshold table that maps a raw AQI reading onto a
//! band, and the display lookups (labels, color tokens, map marker styling)
//! keyed by band. It also defines the closed set of tracked pollutants.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Highest AQI that is still [`AqiCategory::Good`].
pub const GOOD_MAX: u32 = 50;
/// Highest AQI that is still [`AqiCategory::Moderate`].
pub const MODERATE_MAX: u32 = 100;
/// Highest AQI that is still [`AqiCategory::Poor`].
pub const POOR_MAX: u32 = 200;
/// Highest AQI that is still [`AqiCategory::VeryPoor`].
pub const VERY_POOR_MAX: u32 = 300;

/// Air quality band derived from an AQI reading, from best to worst.
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AqiCategory {
    /// AQI 0-50
    Good,
    /// AQI 51-100
    Moderate,
    /// AQI 101-200
    Poor,
    /// AQI 201-300
    VeryPoor,
    /// AQI above 300
    Severe,
}

impl AqiCategory {
    /// Classifies an AQI reading.
    ///
    /// Upper bounds are inclusive: `50` is [`Self::Good`] and `51` is
    /// [`Self::Moderate`].
    #[must_use]
    pub const fn classify(aqi: u32) -> Self {
        if aqi <= GOOD_MAX {
            Self::Good
        } else if aqi <= MODERATE_MAX {
            Self::Moderate
        } else if aqi <= POOR_MAX {
            Self::Poor
        } else if aqi <= VERY_POOR_MAX {
            Self::VeryPoor
        } else {
            Self::Severe
        }
    }

    /// Classifies a fractional AQI reading using the same thresholds as
    /// [`Self::classify`], so `50.5` lands in [`Self::Moderate`].
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative, `NaN`, or infinite.
    pub fn classify_value(aqi: f64) -> Result<Self, InvalidAqiError> {
        if !aqi.is_finite() || aqi < 0.0 {
            return Err(InvalidAqiError { value: aqi });
        }

        Ok(if aqi <= f64::from(GOOD_MAX) {
            Self::Good
        } else if aqi <= f64::from(MODERATE_MAX) {
            Self::Moderate
        } else if aqi <= f64::from(POOR_MAX) {
            Self::Poor
        } else if aqi <= f64::from(VERY_POOR_MAX) {
            Self::VeryPoor
        } else {
            Self::Severe
        })
    }

    /// Bands a pollutant's value-to-safe-limit ratio.
    ///
    /// At or below half the limit is good, up to the limit moderate, then
    /// poor up to 1.5x, very poor up to 2x, and severe beyond that.
    #[must_use]
    pub fn from_exceedance_ratio(ratio: f64) -> Self {
        if ratio <= 0.5 {
            Self::Good
        } else if ratio <= 1.0 {
            Self::Moderate
        } else if ratio <= 1.5 {
            Self::Poor
        } else if ratio <= 2.0 {
            Self::VeryPoor
        } else {
            Self::Severe
        }
    }

    /// Human-readable label (e.g. "Very Poor").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
            Self::Severe => "Severe",
        }
    }

    /// Theme color token the frontend resolves to a palette entry.
    #[must_use]
    pub const fn color_token(self) -> &'static str {
        match self {
            Self::Good => "aqi-good",
            Self::Moderate => "aqi-moderate",
            Self::Poor => "aqi-poor",
            Self::VeryPoor => "aqi-very-poor",
            Self::Severe => "aqi-severe",
        }
    }

    /// Hex fill color for map markers.
    #[must_use]
    pub const fn marker_color(self) -> &'static str {
        match self {
            Self::Good => "#22c55e",
            Self::Moderate => "#eab308",
            Self::Poor => "#f97316",
            Self::VeryPoor => "#ef4444",
            Self::Severe => "#7c3aed",
        }
    }

    /// Map marker radius in pixels. Worse air gets a larger circle.
    #[must_use]
    pub const fn marker_radius(self) -> u8 {
        match self {
            Self::Good => 18,
            Self::Moderate => 22,
            Self::Poor => 26,
            Self::VeryPoor => 30,
            Self::Severe => 34,
        }
    }

    /// Inclusive AQI bounds for this band. The upper bound is `None` for
    /// [`Self::Severe`].
    #[must_use]
    pub const fn bounds(self) -> (u32, Option<u32>) {
        match self {
            Self::Good => (0, Some(GOOD_MAX)),
            Self::Moderate => (GOOD_MAX + 1, Some(MODERATE_MAX)),
            Self::Poor => (MODERATE_MAX + 1, Some(POOR_MAX)),
            Self::VeryPoor => (POOR_MAX + 1, Some(VERY_POOR_MAX)),
            Self::Severe => (VERY_POOR_MAX + 1, None),
        }
    }

    /// Legend range text (e.g. "51-100", "301+").
    #[must_use]
    pub fn range_label(self) -> String {
        match self.bounds() {
            (low, Some(high)) => format!("{low}-{high}"),
            (low, None) => format!("{low}+"),
        }
    }

    /// Returns all variants, best to worst.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Good,
            Self::Moderate,
            Self::Poor,
            Self::VeryPoor,
            Self::Severe,
        ]
    }
}

/// Error returned when a fractional AQI reading cannot be classified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidAqiError {
    /// The rejected reading.
    pub value: f64,
}

impl std::fmt::Display for InvalidAqiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid AQI value {}: expected a finite, non-negative number",
            self.value
        )
    }
}

impl std::error::Error for InvalidAqiError {}

/// Pollutants tracked per ward.
///
/// The wire form is the conventional chemical notation used in the fixtures
/// (`"PM2.5"`, `"NO2"`), which is also the key of the citizen-action table.
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
pub enum Pollutant {
    /// Fine particulate matter
    #[serde(rename = "PM2.5")]
    #[strum(serialize = "PM2.5")]
    Pm25,
    /// Coarse particulate matter
    #[serde(rename = "PM10")]
    #[strum(serialize = "PM10")]
    Pm10,
    /// Nitrogen dioxide
    #[serde(rename = "NO2")]
    #[strum(serialize = "NO2")]
    No2,
    /// Sulphur dioxide
    #[serde(rename = "SO2")]
    #[strum(serialize = "SO2")]
    So2,
    /// Ozone
    #[serde(rename = "O3")]
    #[strum(serialize = "O3")]
    O3,
}

impl Pollutant {
    /// Chart label with subscripts (e.g. "NO₂").
    #[must_use]
    pub const fn chart_label(self) -> &'static str {
        match self {
            Self::Pm25 => "PM2.5",
            Self::Pm10 => "PM10",
            Self::No2 => "NO₂",
            Self::So2 => "SO₂",
            Self::O3 => "O₃",
        }
    }

    /// Field name of this pollutant in a pollutant reading set.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Pm25 => "pm25",
            Self::Pm10 => "pm10",
            Self::No2 => "no2",
            Self::So2 => "so2",
            Self::O3 => "o3",
        }
    }

    /// Returns all variants in chart order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Pm25, Self::Pm10, Self::No2, Self::So2, Self::O3]
    }
}
