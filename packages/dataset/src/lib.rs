#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Read-only access to the ward air-quality dataset.
//!
//! The dataset is seven JSON fixture collections (see [`registry`]) parsed
//! and validated once into a [`Dataset`]. Validation failures are fatal:
//! the data is static, so a malformed record is a packaging error rather
//! than something to recover from per request.
//!
//! Record-shaped lookups return `Option` when the key is unknown;
//! list-shaped lookups (sources, policies) return an empty slice.

pub mod registry;
mod validate;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use ward_aqi_aqi_models::{AqiCategory, Pollutant};
use ward_aqi_dataset_models::{
    CitizenAction, Policy, PolicyEntry, PollutionLevel, PollutionSource, Prediction, TrendData,
    Ward,
};

use crate::registry::RawFixtures;

/// Errors raised while loading the dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A fixture file could not be read from disk.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A fixture file is not valid JSON or is missing required fields.
    #[error("Malformed {file}: {source}")]
    Parse {
        /// Fixture file name.
        file: &'static str,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Two wards share the same identifier.
    #[error("Duplicate ward id {id}")]
    DuplicateWard {
        /// The repeated identifier.
        id: String,
    },

    /// A keyed collection references a ward that does not exist.
    #[error("{file} references unknown ward {id}")]
    UnknownWard {
        /// Fixture file name.
        file: &'static str,
        /// The unknown identifier.
        id: String,
    },

    /// A stored category disagrees with the classification of its AQI.
    #[error("Ward {ward_id}: stored category {stored} does not match AQI {aqi} ({expected})")]
    CategoryMismatch {
        /// Ward identifier.
        ward_id: String,
        /// Stored AQI reading.
        aqi: u32,
        /// Category stored in the fixture.
        stored: AqiCategory,
        /// Category the AQI classifies to.
        expected: AqiCategory,
    },

    /// A record holds a value outside its allowed range.
    #[error("Invalid record in {file} for {key}: {message}")]
    InvalidRecord {
        /// Fixture file name.
        file: &'static str,
        /// Ward id or pollutant the record belongs to.
        key: String,
        /// Description of what went wrong.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// File envelopes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct WardsFile {
    wards: Vec<Ward>,
}

#[derive(Deserialize)]
struct LevelsFile {
    levels: BTreeMap<String, PollutionLevel>,
}

#[derive(Deserialize)]
struct SourcesFile {
    sources: BTreeMap<String, Vec<PollutionSource>>,
}

#[derive(Deserialize)]
struct TrendsFile {
    trends: BTreeMap<String, TrendData>,
}

#[derive(Deserialize)]
struct PredictionsFile {
    predictions: BTreeMap<String, Prediction>,
}

#[derive(Deserialize)]
struct ActionsFile {
    actions: BTreeMap<Pollutant, CitizenAction>,
}

#[derive(Deserialize)]
struct PoliciesFile {
    policies: BTreeMap<String, PolicyEntry>,
}

fn parse<T: DeserializeOwned>(file: &'static str, json: &str) -> Result<T, DatasetError> {
    serde_json::from_str(json).map_err(|source| DatasetError::Parse { file, source })
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// The fully loaded, validated dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    wards: Vec<Ward>,
    ward_index: BTreeMap<String, usize>,
    levels: BTreeMap<String, PollutionLevel>,
    sources: BTreeMap<String, Vec<PollutionSource>>,
    trends: BTreeMap<String, TrendData>,
    predictions: BTreeMap<String, Prediction>,
    actions: BTreeMap<Pollutant, CitizenAction>,
    policies: BTreeMap<String, Vec<Policy>>,
}

impl Dataset {
    /// Loads the fixtures embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if any embedded fixture is malformed.
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_fixtures(&registry::bundled())
    }

    /// Loads the seven fixture files from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if a file cannot be read or is malformed.
    pub fn load_dir(dir: &Path) -> Result<Self, DatasetError> {
        log::info!("Loading dataset from {}", dir.display());

        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|source| DatasetError::Io { path, source })
        };

        let wards = read(registry::WARDS_FILE)?;
        let pollution_levels = read(registry::POLLUTION_LEVELS_FILE)?;
        let pollution_sources = read(registry::POLLUTION_SOURCES_FILE)?;
        let historical_trends = read(registry::HISTORICAL_TRENDS_FILE)?;
        let predictions = read(registry::PREDICTIONS_FILE)?;
        let citizen_actions = read(registry::CITIZEN_ACTIONS_FILE)?;
        let policies = read(registry::POLICIES_FILE)?;

        Self::from_fixtures(&RawFixtures {
            wards: &wards,
            pollution_levels: &pollution_levels,
            pollution_sources: &pollution_sources,
            historical_trends: &historical_trends,
            predictions: &predictions,
            citizen_actions: &citizen_actions,
            policies: &policies,
        })
    }

    /// Parses and validates a fixture set.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if any collection is malformed, references
    /// an unknown ward, or violates a record invariant.
    pub fn from_fixtures(raw: &RawFixtures<'_>) -> Result<Self, DatasetError> {
        let WardsFile { wards } = parse(registry::WARDS_FILE, raw.wards)?;
        let LevelsFile { levels } = parse(registry::POLLUTION_LEVELS_FILE, raw.pollution_levels)?;
        let SourcesFile { sources } =
            parse(registry::POLLUTION_SOURCES_FILE, raw.pollution_sources)?;
        let TrendsFile { trends } = parse(registry::HISTORICAL_TRENDS_FILE, raw.historical_trends)?;
        let PredictionsFile { predictions } = parse(registry::PREDICTIONS_FILE, raw.predictions)?;
        let ActionsFile { actions } = parse(registry::CITIZEN_ACTIONS_FILE, raw.citizen_actions)?;
        let PoliciesFile { policies } = parse(registry::POLICIES_FILE, raw.policies)?;

        let mut ward_index = BTreeMap::new();
        for (idx, ward) in wards.iter().enumerate() {
            if ward_index.insert(ward.id.clone(), idx).is_some() {
                return Err(DatasetError::DuplicateWard {
                    id: ward.id.clone(),
                });
            }
            validate::ward(ward)?;
        }

        let known: BTreeSet<&str> = ward_index.keys().map(String::as_str).collect();
        validate::keys_known(registry::POLLUTION_LEVELS_FILE, levels.keys(), &known)?;
        validate::keys_known(registry::POLLUTION_SOURCES_FILE, sources.keys(), &known)?;
        validate::keys_known(registry::HISTORICAL_TRENDS_FILE, trends.keys(), &known)?;
        validate::keys_known(registry::PREDICTIONS_FILE, predictions.keys(), &known)?;
        validate::keys_known(registry::POLICIES_FILE, policies.keys(), &known)?;

        for (id, level) in &levels {
            validate::pollution_level(id, level)?;
        }
        for (id, list) in &sources {
            validate::sources(id, list)?;
        }
        for (id, prediction) in &predictions {
            validate::prediction(id, prediction)?;
        }

        let policies: BTreeMap<String, Vec<Policy>> = policies
            .into_iter()
            .map(|(id, entry)| (id, entry.into_vec()))
            .collect();

        log::info!(
            "Loaded dataset: {} wards, {} pollution levels, {} source sets, {} trend sets, \
             {} predictions, {} action templates, {} policy sets",
            wards.len(),
            levels.len(),
            sources.len(),
            trends.len(),
            predictions.len(),
            actions.len(),
            policies.len(),
        );

        Ok(Self {
            wards,
            ward_index,
            levels,
            sources,
            trends,
            predictions,
            actions,
            policies,
        })
    }

    /// All wards in fixture load order.
    #[must_use]
    pub fn wards(&self) -> &[Ward] {
        &self.wards
    }

    /// Looks up a ward by id.
    #[must_use]
    pub fn ward(&self, id: &str) -> Option<&Ward> {
        self.ward_index.get(id).map(|&idx| &self.wards[idx])
    }

    /// Current pollution level for a ward.
    #[must_use]
    pub fn pollution_level(&self, ward_id: &str) -> Option<&PollutionLevel> {
        self.levels.get(ward_id)
    }

    /// Every pollution level paired with its ward, in ward load order.
    ///
    /// Every level belongs to a known ward (enforced at load), so this
    /// yields all levels.
    pub fn pollution_levels(&self) -> impl Iterator<Item = (&Ward, &PollutionLevel)> {
        self.wards
            .iter()
            .filter_map(|ward| self.levels.get(&ward.id).map(|level| (ward, level)))
    }

    /// Pollution sources for a ward in fixture order. Empty when the ward
    /// has none.
    #[must_use]
    pub fn pollution_sources(&self, ward_id: &str) -> &[PollutionSource] {
        self.sources.get(ward_id).map_or(&[], Vec::as_slice)
    }

    /// Historical trends for a ward.
    #[must_use]
    pub fn trends(&self, ward_id: &str) -> Option<&TrendData> {
        self.trends.get(ward_id)
    }

    /// Forecast for a ward.
    #[must_use]
    pub fn prediction(&self, ward_id: &str) -> Option<&Prediction> {
        self.predictions.get(ward_id)
    }

    /// Citizen action template for a pollutant.
    #[must_use]
    pub fn citizen_actions(&self, pollutant: Pollutant) -> Option<&CitizenAction> {
        self.actions.get(&pollutant)
    }

    /// Policy recommendations for a ward. Empty when the ward has none.
    #[must_use]
    pub fn policies(&self, ward_id: &str) -> &[Policy] {
        self.policies.get(ward_id).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WARDS: &str = r#"{"wards": [
        {"id": "a", "name": "Alpha", "zone": "North", "population": 100, "area": 1.5, "coordinates": [28.6, 77.2]},
        {"id": "b", "name": "Bravo", "zone": "South", "population": 200, "area": 2.0, "coordinates": [28.5, 77.1]}
    ]}"#;

    const LEVELS: &str = r#"{"levels": {
        "a": {"aqi": 42, "category": "good", "dominantPollutant": "O3", "lastUpdated": "2024-11-15T08:30:00Z",
              "pollutants": {
                "pm25": {"value": 20, "unit": "µg/m³", "safeLimit": 60},
                "pm10": {"value": 40, "unit": "µg/m³", "safeLimit": 100},
                "no2": {"value": 30, "unit": "µg/m³", "safeLimit": 80},
                "so2": {"value": 5, "unit": "µg/m³", "safeLimit": 80},
                "o3": {"value": 70, "unit": "µg/m³", "safeLimit": 100}}}
    }}"#;

    const SOURCES: &str = r#"{"sources": {
        "a": [{"source": "Vehicular Traffic", "contribution": 40, "description": "cars"}]
    }}"#;

    const TRENDS: &str = r#"{"trends": {
        "a": {"daily": [{"date": "2024-11-01", "aqi": 40}], "monthly": [{"month": "Nov", "aqi": 41}], "yearly": [{"year": "2024", "aqi": 45}]}
    }}"#;

    const PREDICTIONS: &str = r#"{"predictions": {
        "a": {"forecast": [{"date": "2024-11-16", "aqi": 44, "lower": 35, "upper": 52}], "confidence": 0.8, "methodology": "persistence"}
    }}"#;

    const ACTIONS: &str = r#"{"actions": {
        "O3": {"personal": ["stay in shade"], "daily": ["refuel at night"], "community": ["plant trees"]}
    }}"#;

    const POLICIES: &str = r#"{"policies": {
        "a": {"problem": "traffic", "policy": "pricing", "description": "charge", "impact": "less traffic"}
    }}"#;

    fn fixtures() -> RawFixtures<'static> {
        RawFixtures {
            wards: WARDS,
            pollution_levels: LEVELS,
            pollution_sources: SOURCES,
            historical_trends: TRENDS,
            predictions: PREDICTIONS,
            citizen_actions: ACTIONS,
            policies: POLICIES,
        }
    }

    #[test]
    fn loads_minimal_fixtures() {
        let dataset = Dataset::from_fixtures(&fixtures()).unwrap();
        assert_eq!(dataset.wards().len(), 2);
        assert_eq!(dataset.pollution_levels().count(), 1);
    }

    #[test]
    fn wards_keep_load_order() {
        let dataset = Dataset::from_fixtures(&fixtures()).unwrap();
        let ids: Vec<&str> = dataset.wards().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn missing_records_are_none() {
        let dataset = Dataset::from_fixtures(&fixtures()).unwrap();
        assert!(dataset.ward("zzz").is_none());
        assert!(dataset.pollution_level("b").is_none());
        assert!(dataset.trends("b").is_none());
        assert!(dataset.prediction("b").is_none());
        assert!(dataset.citizen_actions(Pollutant::So2).is_none());
    }

    #[test]
    fn missing_lists_are_empty() {
        let dataset = Dataset::from_fixtures(&fixtures()).unwrap();
        assert!(dataset.pollution_sources("b").is_empty());
        assert!(dataset.policies("b").is_empty());
        assert!(dataset.pollution_sources("zzz").is_empty());
        assert!(dataset.policies("zzz").is_empty());
    }

    #[test]
    fn single_policy_is_normalized_to_list() {
        let dataset = Dataset::from_fixtures(&fixtures()).unwrap();
        let policies = dataset.policies("a");
        assert_eq!(policies.len(), 1);
        assert_eq!(policies[0].policy, "pricing");
    }

    #[test]
    fn actions_are_keyed_by_pollutant() {
        let dataset = Dataset::from_fixtures(&fixtures()).unwrap();
        let actions = dataset.citizen_actions(Pollutant::O3).unwrap();
        assert_eq!(actions.community, ["plant trees"]);
    }

    #[test]
    fn rejects_category_mismatch() {
        let levels = LEVELS.replace(r#""category": "good""#, r#""category": "moderate""#);
        let raw = RawFixtures {
            pollution_levels: &levels,
            ..fixtures()
        };
        let err = Dataset::from_fixtures(&raw).unwrap_err();
        assert!(
            matches!(
                err,
                DatasetError::CategoryMismatch {
                    aqi: 42,
                    stored: AqiCategory::Moderate,
                    expected: AqiCategory::Good,
                    ..
                }
            ),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn rejects_unknown_ward_key() {
        let sources = SOURCES.replace(r#""a":"#, r#""ghost":"#);
        let raw = RawFixtures {
            pollution_sources: &sources,
            ..fixtures()
        };
        let err = Dataset::from_fixtures(&raw).unwrap_err();
        assert!(
            matches!(err, DatasetError::UnknownWard { ref id, .. } if id == "ghost"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn rejects_missing_required_field() {
        let wards = WARDS.replace(r#""zone": "North", "#, "");
        let raw = RawFixtures {
            wards: &wards,
            ..fixtures()
        };
        let err = Dataset::from_fixtures(&raw).unwrap_err();
        assert!(
            matches!(
                err,
                DatasetError::Parse {
                    file: registry::WARDS_FILE,
                    ..
                }
            ),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn rejects_negative_aqi() {
        let levels = LEVELS.replace(r#""aqi": 42"#, r#""aqi": -3"#);
        let raw = RawFixtures {
            pollution_levels: &levels,
            ..fixtures()
        };
        assert!(matches!(
            Dataset::from_fixtures(&raw),
            Err(DatasetError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_unknown_category_literal() {
        let levels = LEVELS.replace(r#""category": "good""#, r#""category": "hazardous""#);
        let raw = RawFixtures {
            pollution_levels: &levels,
            ..fixtures()
        };
        assert!(matches!(
            Dataset::from_fixtures(&raw),
            Err(DatasetError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_ward() {
        let wards = WARDS.replace(r#""id": "b""#, r#""id": "a""#);
        let raw = RawFixtures {
            wards: &wards,
            ..fixtures()
        };
        assert!(matches!(
            Dataset::from_fixtures(&raw),
            Err(DatasetError::DuplicateWard { ref id }) if id == "a"
        ));
    }

    #[test]
    fn rejects_out_of_range_contribution() {
        let sources = SOURCES.replace(r#""contribution": 40"#, r#""contribution": 140"#);
        let raw = RawFixtures {
            pollution_sources: &sources,
            ..fixtures()
        };
        assert!(matches!(
            Dataset::from_fixtures(&raw),
            Err(DatasetError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn rejects_forecast_band_not_enclosing_value() {
        let predictions = PREDICTIONS.replace(r#""lower": 35"#, r#""lower": 50"#);
        let raw = RawFixtures {
            predictions: &predictions,
            ..fixtures()
        };
        assert!(matches!(
            Dataset::from_fixtures(&raw),
            Err(DatasetError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_area() {
        let wards = WARDS.replace(r#""area": 1.5"#, r#""area": 0"#);
        let raw = RawFixtures {
            wards: &wards,
            ..fixtures()
        };
        assert!(matches!(
            Dataset::from_fixtures(&raw),
            Err(DatasetError::InvalidRecord { key, .. }) if key == "a"
        ));
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let wards = WARDS.replace("[28.6, 77.2]", "[98.6, 77.2]");
        let raw = RawFixtures {
            wards: &wards,
            ..fixtures()
        };
        assert!(matches!(
            Dataset::from_fixtures(&raw),
            Err(DatasetError::InvalidRecord { key, .. }) if key == "a"
        ));
    }

    #[test]
    fn rejects_non_positive_safe_limit() {
        let levels = LEVELS.replace(r#""safeLimit": 60"#, r#""safeLimit": 0"#);
        let raw = RawFixtures {
            pollution_levels: &levels,
            ..fixtures()
        };
        assert!(matches!(
            Dataset::from_fixtures(&raw),
            Err(DatasetError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn rejects_confidence_above_one() {
        let predictions = PREDICTIONS.replace(r#""confidence": 0.8"#, r#""confidence": 1.5"#);
        let raw = RawFixtures {
            predictions: &predictions,
            ..fixtures()
        };
        assert!(matches!(
            Dataset::from_fixtures(&raw),
            Err(DatasetError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn io_error_names_the_path() {
        let dir = std::env::temp_dir().join("ward_aqi_dataset_io_message");
        let err = Dataset::load_dir(&dir).unwrap_err();
        assert!(err.to_string().contains("wards.json"), "{err}");
    }

    #[test]
    fn load_dir_reports_missing_file() {
        let dir = std::env::temp_dir().join("ward_aqi_dataset_missing_dir");
        let err = Dataset::load_dir(&dir).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }), "unexpected: {err}");
    }

    #[test]
    fn load_dir_reads_all_files() {
        let dir = std::env::temp_dir().join(format!("ward_aqi_dataset_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let raw = fixtures();
        for (name, contents) in [
            (registry::WARDS_FILE, raw.wards),
            (registry::POLLUTION_LEVELS_FILE, raw.pollution_levels),
            (registry::POLLUTION_SOURCES_FILE, raw.pollution_sources),
            (registry::HISTORICAL_TRENDS_FILE, raw.historical_trends),
            (registry::PREDICTIONS_FILE, raw.predictions),
            (registry::CITIZEN_ACTIONS_FILE, raw.citizen_actions),
            (registry::POLICIES_FILE, raw.policies),
        ] {
            std::fs::write(dir.join(name), contents).unwrap();
        }

        let dataset = Dataset::load_dir(&dir).unwrap();
        assert_eq!(dataset.wards().len(), 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    // -- Bundled fixtures ---------------------------------------------------

    #[test]
    fn bundled_fixtures_load() {
        let dataset = Dataset::bundled().unwrap();
        assert!(!dataset.wards().is_empty());
    }

    #[test]
    fn bundled_categories_match_classification() {
        let dataset = Dataset::bundled().unwrap();
        for (ward, level) in dataset.pollution_levels() {
            assert_eq!(
                level.category,
                AqiCategory::classify(level.aqi),
                "{} stores {} for AQI {}",
                ward.id,
                level.category,
                level.aqi
            );
        }
    }

    #[test]
    fn bundled_ward_ids_are_unique() {
        let dataset = Dataset::bundled().unwrap();
        let mut seen = BTreeSet::new();
        for ward in dataset.wards() {
            assert!(seen.insert(&ward.id), "Duplicate ward id {}", ward.id);
        }
    }

    #[test]
    fn bundled_dominant_pollutants_have_actions() {
        let dataset = Dataset::bundled().unwrap();
        for (ward, level) in dataset.pollution_levels() {
            assert!(
                dataset.citizen_actions(level.dominant_pollutant).is_some(),
                "{}: no actions for {}",
                ward.id,
                level.dominant_pollutant
            );
        }
    }
}
