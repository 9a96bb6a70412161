#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the ward AQI server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the fixture record types so the API contract can evolve
//! independently of the bundled data files.

use serde::{Deserialize, Serialize};
use ward_aqi_analytics_models::{CategoryCount, CityStats, PollutantBreakdown};
use ward_aqi_aqi_models::{AqiCategory, Pollutant};
use ward_aqi_dataset_models::{
    CitizenAction, Coordinates, PollutionLevel, PollutionSource, Prediction, Ward,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Error body returned with 4xx/5xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Human-readable message.
    pub error: String,
}

impl ApiError {
    /// Creates an error body.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// One row of the AQI map legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLegendEntry {
    /// Category.
    pub category: AqiCategory,
    /// Display label (e.g. "Very Poor").
    pub label: String,
    /// AQI range text (e.g. "201-300").
    pub range: String,
    /// Frontend color token (e.g. "aqi-very-poor").
    pub color_token: String,
    /// Marker hex color.
    pub color: String,
}

impl From<AqiCategory> for ApiLegendEntry {
    fn from(category: AqiCategory) -> Self {
        Self {
            category,
            label: category.label().to_string(),
            range: category.range_label(),
            color_token: category.color_token().to_string(),
            color: category.marker_color().to_string(),
        }
    }
}

/// City-wide statistics with the per-category ward distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCityStats {
    /// Headline statistics.
    #[serde(flatten)]
    pub stats: CityStats,
    /// Ward counts for every category, best to worst.
    pub distribution: Vec<CategoryCount>,
}

/// A ward as drawn on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiWardMarker {
    /// Ward identifier.
    pub id: String,
    /// Ward display name.
    pub name: String,
    /// Administrative zone.
    pub zone: String,
    /// Marker position.
    pub coordinates: Coordinates,
    /// Current AQI.
    pub aqi: u32,
    /// Category of the current AQI.
    pub category: AqiCategory,
    /// Dominant pollutant.
    pub dominant_pollutant: Pollutant,
    /// Marker fill color.
    pub color: String,
    /// Marker radius in pixels.
    pub radius: u8,
}

impl From<(&Ward, &PollutionLevel)> for ApiWardMarker {
    fn from((ward, level): (&Ward, &PollutionLevel)) -> Self {
        let category = level.classified_category();
        Self {
            id: ward.id.clone(),
            name: ward.name.clone(),
            zone: ward.zone.clone(),
            coordinates: ward.coordinates,
            aqi: level.aqi,
            category,
            dominant_pollutant: level.dominant_pollutant,
            color: category.marker_color().to_string(),
            radius: category.marker_radius(),
        }
    }
}

/// Everything the ward detail view shows above the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiWardDetail {
    /// The ward.
    pub ward: Ward,
    /// Current pollution level, if any.
    pub level: Option<PollutionLevel>,
    /// Category of the current AQI.
    pub category: Option<AqiCategory>,
    /// Display label of `category`.
    pub category_label: Option<String>,
    /// Headline sentence.
    pub summary: Option<String>,
    /// Pollutant readings against their safe limits.
    pub pollutants: Vec<PollutantBreakdown>,
    /// Largest pollution sources, descending.
    pub top_sources: Vec<PollutionSource>,
}

/// A ward forecast with its confidence as a whole percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPrediction {
    /// The forecast as loaded.
    #[serde(flatten)]
    pub prediction: Prediction,
    /// `confidence` scaled to `0..=100`.
    pub confidence_percent: u8,
}

impl From<&Prediction> for ApiPrediction {
    fn from(prediction: &Prediction) -> Self {
        Self {
            confidence_percent: prediction.confidence_percent(),
            prediction: prediction.clone(),
        }
    }
}

/// Citizen actions for a pollutant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiActions {
    /// Pollutant the actions address.
    pub pollutant: Pollutant,
    /// The grouped actions.
    #[serde(flatten)]
    pub actions: CitizenAction,
}

/// Query parameters for the action endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionsQueryParams {
    /// Maximum actions per group. Defaults to all for
    /// `/api/actions/{pollutant}` and to the detail view cap for a ward.
    pub limit: Option<usize>,
}

/// An entry in the open data catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDataFile {
    /// File name, also the download path segment.
    pub name: String,
    /// What the file contains.
    pub description: String,
}

/// Body of a suggestion submission.
///
/// Both fields are optional at the wire level so a missing value is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitSuggestionRequest {
    /// Category label (e.g. "Green Spaces").
    pub category: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
}
