//! City-wide landing statistics.
//!
//! Categories are always recomputed from the AQI reading via
//! [`AqiCategory::classify`] rather than read from the stored category.

use ward_aqi_analytics_models::{CategoryCount, CityStats, WardRef};
use ward_aqi_aqi_models::AqiCategory;
use ward_aqi_dataset::Dataset;
use ward_aqi_dataset_models::Ward;

/// Mean of `readings` rounded to the nearest integer, halves rounding up.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn average_aqi(readings: &[u32]) -> Option<u32> {
    let n = u64::try_from(readings.len()).ok()?;
    if n == 0 {
        return None;
    }
    let sum: u64 = readings.iter().map(|&aqi| u64::from(aqi)).sum();
    u32::try_from((sum + n / 2) / n).ok()
}

/// Counts readings per category. All five categories are present, in
/// best-to-worst order, including zero counts.
#[must_use]
pub fn category_distribution(readings: impl IntoIterator<Item = u32>) -> Vec<CategoryCount> {
    let mut counts = [0u64; 5];
    for aqi in readings {
        let category = AqiCategory::classify(aqi);
        if let Some(idx) = AqiCategory::all().iter().position(|c| *c == category) {
            counts[idx] += 1;
        }
    }

    AqiCategory::all()
        .iter()
        .zip(counts)
        .map(|(category, count)| CategoryCount {
            category: *category,
            count,
        })
        .collect()
}

/// Computes [`CityStats`] from a ward count and `(ward, aqi)` readings
/// supplied in ward load order.
///
/// On ties for the lowest AQI the first ward encountered wins.
#[must_use]
pub fn summarize<'a>(
    total_wards: usize,
    readings: impl IntoIterator<Item = (&'a Ward, u32)>,
) -> CityStats {
    let readings: Vec<(&Ward, u32)> = readings.into_iter().collect();
    let aqis: Vec<u32> = readings.iter().map(|(_, aqi)| *aqi).collect();

    let severe_count = aqis
        .iter()
        .filter(|&&aqi| AqiCategory::classify(aqi) == AqiCategory::Severe)
        .count();

    let mut cleanest: Option<(&Ward, u32)> = None;
    for &(ward, aqi) in &readings {
        if cleanest.is_none_or(|(_, best)| aqi < best) {
            cleanest = Some((ward, aqi));
        }
    }

    CityStats {
        total_wards: total_wards as u64,
        severe_count: severe_count as u64,
        average_aqi: average_aqi(&aqis),
        cleanest_ward: cleanest.map(|(ward, _)| WardRef {
            id: ward.id.clone(),
            name: ward.name.clone(),
        }),
    }
}

/// City-wide statistics for the loaded dataset.
#[must_use]
pub fn city_stats(dataset: &Dataset) -> CityStats {
    let stats = summarize(
        dataset.wards().len(),
        dataset
            .pollution_levels()
            .map(|(ward, level)| (ward, level.aqi)),
    );
    log::debug!(
        "City stats: {} wards, {} severe, average {:?}",
        stats.total_wards,
        stats.severe_count,
        stats.average_aqi
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_aqi_dataset_models::Coordinates;

    fn ward(id: &str) -> Ward {
        Ward {
            id: id.to_string(),
            name: format!("Ward {id}"),
            zone: "Test".to_string(),
            population: 1_000,
            area: 1.0,
            coordinates: Coordinates {
                latitude: 28.6,
                longitude: 77.2,
            },
        }
    }

    #[test]
    fn mixed_readings() {
        let (a, b, c) = (ward("A"), ward("B"), ward("C"));
        let stats = summarize(3, [(&a, 10), (&b, 400), (&c, 120)]);

        assert_eq!(stats.total_wards, 3);
        assert_eq!(stats.average_aqi, Some(177));
        assert_eq!(stats.severe_count, 1);
        assert_eq!(stats.cleanest_ward.unwrap().id, "A");
    }

    #[test]
    fn empty_readings_report_no_data() {
        let stats = summarize(0, std::iter::empty());
        assert_eq!(stats.total_wards, 0);
        assert_eq!(stats.severe_count, 0);
        assert_eq!(stats.average_aqi, None);
        assert_eq!(stats.cleanest_ward, None);
    }

    #[test]
    fn wards_without_readings_still_count() {
        let a = ward("A");
        let stats = summarize(4, [(&a, 80)]);
        assert_eq!(stats.total_wards, 4);
        assert_eq!(stats.average_aqi, Some(80));
    }

    #[test]
    fn cleanest_tie_goes_to_first_in_load_order() {
        let (a, b, c) = (ward("A"), ward("B"), ward("C"));
        let stats = summarize(3, [(&a, 90), (&b, 35), (&c, 35)]);
        assert_eq!(stats.cleanest_ward.unwrap().id, "B");
    }

    #[test]
    fn severe_boundary() {
        let (a, b) = (ward("A"), ward("B"));
        let stats = summarize(2, [(&a, 300), (&b, 301)]);
        assert_eq!(stats.severe_count, 1);
    }

    #[test]
    fn average_rounds_half_up() {
        assert_eq!(average_aqi(&[1, 2]), Some(2));
        assert_eq!(average_aqi(&[1, 1, 2]), Some(1));
        assert_eq!(average_aqi(&[1, 2, 2]), Some(2));
        assert_eq!(average_aqi(&[100]), Some(100));
        assert_eq!(average_aqi(&[]), None);
    }

    #[test]
    fn average_does_not_overflow() {
        assert_eq!(average_aqi(&[u32::MAX, u32::MAX]), Some(u32::MAX));
    }

    #[test]
    fn distribution_covers_all_categories() {
        let counts = category_distribution([10, 50, 51, 150, 250, 500, 301]);
        let pairs: Vec<(AqiCategory, u64)> =
            counts.iter().map(|c| (c.category, c.count)).collect();
        assert_eq!(
            pairs,
            [
                (AqiCategory::Good, 2),
                (AqiCategory::Moderate, 1),
                (AqiCategory::Poor, 1),
                (AqiCategory::VeryPoor, 1),
                (AqiCategory::Severe, 2),
            ]
        );
    }

    #[test]
    fn distribution_of_nothing_is_all_zero() {
        let counts = category_distribution(std::iter::empty());
        assert_eq!(counts.len(), 5);
        assert!(counts.iter().all(|c| c.count == 0));
    }

    #[test]
    fn bundled_city_stats() {
        let dataset = Dataset::bundled().unwrap();
        let stats = city_stats(&dataset);

        assert_eq!(stats.total_wards, 10);
        assert_eq!(stats.severe_count, 3);
        assert_eq!(stats.average_aqi, Some(225));
        assert_eq!(stats.cleanest_ward.unwrap().id, "ward-010");

        let counts = category_distribution(
            dataset.pollution_levels().map(|(_, level)| level.aqi),
        );
        let total: u64 = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, 10);
    }
}
