//! Fixture registry for the seven dataset files baked into the binary.
//!
//! Each JSON file in `packages/dataset/data/` is embedded at compile time
//! via [`include_str!`]. The same file names are used when loading from a
//! directory on disk.

/// Ward reference data.
pub const WARDS_FILE: &str = "wards.json";
/// Current AQI and pollutant readings.
pub const POLLUTION_LEVELS_FILE: &str = "pollutionLevels.json";
/// Source contribution breakdowns.
pub const POLLUTION_SOURCES_FILE: &str = "pollutionSources.json";
/// Historical AQI series.
pub const HISTORICAL_TRENDS_FILE: &str = "historicalTrends.json";
/// Short-range forecasts.
pub const PREDICTIONS_FILE: &str = "predictions.json";
/// Citizen action templates keyed by pollutant.
pub const CITIZEN_ACTIONS_FILE: &str = "citizenActions.json";
/// Ward policy recommendations.
pub const POLICIES_FILE: &str = "policies.json";

/// A dataset file and what it contains, for the open data catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataFile {
    /// File name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
}

/// All dataset files, in load order.
pub const DATA_FILES: &[DataFile] = &[
    DataFile {
        name: WARDS_FILE,
        description: "Ward boundaries and metadata",
    },
    DataFile {
        name: POLLUTION_LEVELS_FILE,
        description: "Current AQI and pollutant levels",
    },
    DataFile {
        name: POLLUTION_SOURCES_FILE,
        description: "Source contribution analysis",
    },
    DataFile {
        name: HISTORICAL_TRENDS_FILE,
        description: "Historical pollution data",
    },
    DataFile {
        name: PREDICTIONS_FILE,
        description: "Pollution forecasts",
    },
    DataFile {
        name: CITIZEN_ACTIONS_FILE,
        description: "Recommended citizen actions",
    },
    DataFile {
        name: POLICIES_FILE,
        description: "Policy recommendations",
    },
];

/// Fixture contents embedded at compile time.
const EMBEDDED: &[(&str, &str)] = &[
    (WARDS_FILE, include_str!("../data/wards.json")),
    (
        POLLUTION_LEVELS_FILE,
        include_str!("../data/pollutionLevels.json"),
    ),
    (
        POLLUTION_SOURCES_FILE,
        include_str!("../data/pollutionSources.json"),
    ),
    (
        HISTORICAL_TRENDS_FILE,
        include_str!("../data/historicalTrends.json"),
    ),
    (PREDICTIONS_FILE, include_str!("../data/predictions.json")),
    (
        CITIZEN_ACTIONS_FILE,
        include_str!("../data/citizenActions.json"),
    ),
    (POLICIES_FILE, include_str!("../data/policies.json")),
];

/// Raw JSON text for each of the seven dataset files.
#[derive(Debug, Clone, Copy)]
pub struct RawFixtures<'a> {
    /// Contents of [`WARDS_FILE`].
    pub wards: &'a str,
    /// Contents of [`POLLUTION_LEVELS_FILE`].
    pub pollution_levels: &'a str,
    /// Contents of [`POLLUTION_SOURCES_FILE`].
    pub pollution_sources: &'a str,
    /// Contents of [`HISTORICAL_TRENDS_FILE`].
    pub historical_trends: &'a str,
    /// Contents of [`PREDICTIONS_FILE`].
    pub predictions: &'a str,
    /// Contents of [`CITIZEN_ACTIONS_FILE`].
    pub citizen_actions: &'a str,
    /// Contents of [`POLICIES_FILE`].
    pub policies: &'a str,
}

/// Returns the embedded contents of a dataset file by name.
#[must_use]
pub fn embedded(name: &str) -> Option<&'static str> {
    EMBEDDED
        .iter()
        .find(|(file, _)| *file == name)
        .map(|(_, contents)| *contents)
}

/// Returns the embedded fixture set.
#[must_use]
pub const fn bundled() -> RawFixtures<'static> {
    RawFixtures {
        wards: EMBEDDED[0].1,
        pollution_levels: EMBEDDED[1].1,
        pollution_sources: EMBEDDED[2].1,
        historical_trends: EMBEDDED[3].1,
        predictions: EMBEDDED[4].1,
        citizen_actions: EMBEDDED[5].1,
        policies: EMBEDDED[6].1,
    }
}
