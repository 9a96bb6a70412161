//! Per-ward derivations for the ward detail view.

use ward_aqi_analytics_models::PollutantBreakdown;
use ward_aqi_aqi_models::AqiCategory;
use ward_aqi_dataset_models::{CitizenAction, PollutionLevel, PollutionSource, Ward};

/// Number of actions shown per group by default.
pub const DEFAULT_ACTIONS_PER_GROUP: usize = 4;

/// Each pollutant's reading relative to its safe limit, in chart order.
#[must_use]
pub fn pollutant_breakdown(level: &PollutionLevel) -> Vec<PollutantBreakdown> {
    level
        .pollutants
        .iter()
        .map(|(pollutant, reading)| {
            let ratio = reading.exceedance_ratio();
            let percent_above_limit = percent_above(ratio);
            PollutantBreakdown {
                pollutant,
                label: pollutant.chart_label().to_string(),
                value: reading.value,
                unit: reading.unit.clone(),
                safe_limit: reading.safe_limit,
                ratio,
                percent_above_limit,
                status: PollutantBreakdown::status_text(percent_above_limit),
                band: AqiCategory::from_exceedance_ratio(ratio),
            }
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent_above(ratio: f64) -> Option<u32> {
    (ratio > 1.0).then(|| ((ratio - 1.0) * 100.0).round() as u32)
}

/// Sources ordered by descending contribution. Ties keep fixture order.
#[must_use]
pub fn sorted_sources(sources: &[PollutionSource]) -> Vec<PollutionSource> {
    let mut sorted = sources.to_vec();
    sorted.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
    sorted
}

/// The `n` largest sources by contribution.
#[must_use]
pub fn top_sources(sources: &[PollutionSource], n: usize) -> Vec<PollutionSource> {
    let mut sorted = sorted_sources(sources);
    sorted.truncate(n);
    sorted
}

/// Headline sentence describing a ward's current air quality.
#[must_use]
pub fn summary_sentence(ward: &Ward, level: &PollutionLevel) -> String {
    format!(
        "{} is currently experiencing {} air quality with {} as the dominant pollutant. \
         Residents are advised to take necessary precautions.",
        ward.name,
        level.classified_category().label().to_lowercase(),
        level.dominant_pollutant,
    )
}

/// The first `per_group` actions of each group.
#[must_use]
pub fn top_actions(actions: &CitizenAction, per_group: usize) -> CitizenAction {
    let take =
        |list: &[String]| -> Vec<String> { list.iter().take(per_group).cloned().collect() };
    CitizenAction {
        personal: take(&actions.personal),
        daily: take(&actions.daily),
        community: take(&actions.community),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_aqi_aqi_models::Pollutant;
    use ward_aqi_dataset::Dataset;

    fn source(name: &str, contribution: f64) -> PollutionSource {
        PollutionSource {
            source: name.to_string(),
            contribution,
            description: String::new(),
        }
    }

    #[test]
    fn sources_sort_descending_and_stable() {
        let sources = [
            source("Waste Burning", 12.0),
            source("Vehicular Traffic", 38.0),
            source("Construction Dust", 27.0),
            source("Domestic Fuel Usage", 12.0),
        ];
        let names: Vec<String> = sorted_sources(&sources)
            .into_iter()
            .map(|s| s.source)
            .collect();
        assert_eq!(
            names,
            [
                "Vehicular Traffic",
                "Construction Dust",
                "Waste Burning",
                "Domestic Fuel Usage",
            ]
        );
    }

    #[test]
    fn sorting_leaves_input_untouched() {
        let sources = [source("a", 1.0), source("b", 2.0)];
        let _ = sorted_sources(&sources);
        assert_eq!(sources[0].source, "a");
    }

    #[test]
    fn top_sources_truncates() {
        let sources = [source("a", 1.0), source("b", 2.0), source("c", 3.0)];
        let top = top_sources(&sources, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].source, "c");
        assert!(top_sources(&[], 2).is_empty());
    }

    #[test]
    fn breakdown_bands_and_percentages() {
        let dataset = Dataset::bundled().unwrap();
        let level = dataset.pollution_level("ward-001").unwrap();
        let breakdown = pollutant_breakdown(level);

        assert_eq!(breakdown.len(), 5);
        assert_eq!(breakdown[0].pollutant, Pollutant::Pm25);
        for entry in &breakdown {
            assert_eq!(entry.band, AqiCategory::from_exceedance_ratio(entry.ratio));
            assert_eq!(entry.percent_above_limit.is_some(), entry.ratio > 1.0);
            assert_eq!(
                entry.status,
                PollutantBreakdown::status_text(entry.percent_above_limit)
            );
        }
    }

    #[test]
    fn percent_above_rounds() {
        assert_eq!(percent_above(1.354), Some(35));
        assert_eq!(percent_above(1.0), None);
        assert_eq!(percent_above(0.4), None);
        assert_eq!(percent_above(3.0), Some(200));
    }

    #[test]
    fn summary_uses_classified_category() {
        let dataset = Dataset::bundled().unwrap();
        let ward = dataset.ward("ward-004").unwrap();
        let level = dataset.pollution_level("ward-004").unwrap();
        let sentence = summary_sentence(ward, level);
        assert!(
            sentence.starts_with("Rohini is currently experiencing very poor air quality"),
            "{sentence}"
        );
        assert!(sentence.contains("PM2.5 as the dominant pollutant"));
    }

    #[test]
    fn actions_are_capped_per_group() {
        let actions = CitizenAction {
            personal: (0..6).map(|i| format!("p{i}")).collect(),
            daily: vec!["d0".to_string()],
            community: Vec::new(),
        };
        let top = top_actions(&actions, DEFAULT_ACTIONS_PER_GROUP);
        assert_eq!(top.personal, ["p0", "p1", "p2", "p3"]);
        assert_eq!(top.daily, ["d0"]);
        assert!(top.community.is_empty());
    }
}
