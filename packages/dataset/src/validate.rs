//! Load-time record checks that JSON deserialization alone cannot express.

use std::collections::BTreeSet;

use ward_aqi_dataset_models::{PollutionLevel, PollutionSource, Prediction, Ward};

use crate::DatasetError;
use crate::registry::{POLLUTION_LEVELS_FILE, POLLUTION_SOURCES_FILE, PREDICTIONS_FILE, WARDS_FILE};

fn invalid(file: &'static str, key: &str, message: impl Into<String>) -> DatasetError {
    DatasetError::InvalidRecord {
        file,
        key: key.to_string(),
        message: message.into(),
    }
}

pub fn ward(ward: &Ward) -> Result<(), DatasetError> {
    if ward.id.trim().is_empty() {
        return Err(invalid(WARDS_FILE, &ward.name, "empty ward id"));
    }
    if !(ward.area.is_finite() && ward.area > 0.0) {
        return Err(invalid(
            WARDS_FILE,
            &ward.id,
            format!("area must be positive, got {}", ward.area),
        ));
    }
    if !ward.coordinates.is_valid() {
        return Err(invalid(
            WARDS_FILE,
            &ward.id,
            format!(
                "coordinates out of range: [{}, {}]",
                ward.coordinates.latitude, ward.coordinates.longitude
            ),
        ));
    }
    Ok(())
}

pub fn keys_known<'a>(
    file: &'static str,
    keys: impl Iterator<Item = &'a String>,
    known: &BTreeSet<&str>,
) -> Result<(), DatasetError> {
    for key in keys {
        if !known.contains(key.as_str()) {
            return Err(DatasetError::UnknownWard {
                file,
                id: key.clone(),
            });
        }
    }
    Ok(())
}

pub fn pollution_level(ward_id: &str, level: &PollutionLevel) -> Result<(), DatasetError> {
    if !level.is_consistent() {
        return Err(DatasetError::CategoryMismatch {
            ward_id: ward_id.to_string(),
            aqi: level.aqi,
            stored: level.category,
            expected: level.classified_category(),
        });
    }

    for (pollutant, reading) in level.pollutants.iter() {
        if !(reading.safe_limit.is_finite() && reading.safe_limit > 0.0) {
            return Err(invalid(
                POLLUTION_LEVELS_FILE,
                ward_id,
                format!("{pollutant} safe limit must be positive"),
            ));
        }
        if !(reading.value.is_finite() && reading.value >= 0.0) {
            return Err(invalid(
                POLLUTION_LEVELS_FILE,
                ward_id,
                format!("{pollutant} reading must be non-negative"),
            ));
        }
    }
    Ok(())
}

pub fn sources(ward_id: &str, sources: &[PollutionSource]) -> Result<(), DatasetError> {
    for source in sources {
        if !(0.0..=100.0).contains(&source.contribution) {
            return Err(invalid(
                POLLUTION_SOURCES_FILE,
                ward_id,
                format!(
                    "{} contribution {} outside 0-100",
                    source.source, source.contribution
                ),
            ));
        }
    }
    Ok(())
}

pub fn prediction(ward_id: &str, prediction: &Prediction) -> Result<(), DatasetError> {
    if !(0.0..=1.0).contains(&prediction.confidence) {
        return Err(invalid(
            PREDICTIONS_FILE,
            ward_id,
            format!("confidence {} outside 0-1", prediction.confidence),
        ));
    }
    if let Some(point) = prediction
        .forecast
        .iter()
        .find(|p| !p.band_encloses_value())
    {
        return Err(invalid(
            PREDICTIONS_FILE,
            ward_id,
            format!(
                "forecast for {} has AQI {} outside [{}, {}]",
                point.date, point.aqi, point.lower, point.upper
            ),
        ));
    }
    Ok(())
}
