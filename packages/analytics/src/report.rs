//! Plain-text ward report stub.

use std::fmt::Write as _;

use chrono::NaiveDate;
use ward_aqi_dataset_models::{PollutionLevel, PollutionSource, Ward};

use crate::detail::top_sources;

/// Download file name for a ward's report, with whitespace runs replaced
/// by underscores (e.g. `Connaught_Place_Pollution_Report.txt`).
#[must_use]
pub fn report_file_name(ward_name: &str) -> String {
    let stem = ward_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{stem}_Pollution_Report.txt")
}

/// Renders the plain-text report for a ward.
///
/// `level` is optional so a ward without a current reading still gets a
/// report that says so.
#[must_use]
pub fn render_report(
    ward: &Ward,
    level: Option<&PollutionLevel>,
    sources: &[PollutionSource],
    generated: NaiveDate,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Ward-Wise Pollution Report");
    let _ = writeln!(out, "==========================");
    let _ = writeln!(out, "Ward: {}", ward.name);
    let _ = writeln!(out, "Zone: {}", ward.zone);
    let _ = writeln!(out, "Generated: {}", generated.format("%Y-%m-%d"));
    let _ = writeln!(out);

    match level {
        Some(level) => {
            let category = level.classified_category();
            let _ = writeln!(out, "Current AQI: {} ({})", level.aqi, category.label());
            let _ = writeln!(out, "Dominant pollutant: {}", level.dominant_pollutant);
            let _ = writeln!(
                out,
                "Last updated: {}",
                level.last_updated.format("%Y-%m-%d %H:%M UTC")
            );
        }
        None => {
            let _ = writeln!(out, "Current AQI: not available");
        }
    }

    let top = top_sources(sources, 3);
    if !top.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Major sources:");
        for source in &top {
            let _ = writeln!(out, "  - {} ({}%)", source.source, source.contribution);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "This is a summary report. A full report would include detailed\n\
         pollution analysis, trends, and recommendations."
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_aqi_dataset::Dataset;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 15).unwrap()
    }

    #[test]
    fn file_name_replaces_whitespace() {
        assert_eq!(
            report_file_name("Connaught Place"),
            "Connaught_Place_Pollution_Report.txt"
        );
        assert_eq!(
            report_file_name("  Vasant   Kunj "),
            "Vasant_Kunj_Pollution_Report.txt"
        );
        assert_eq!(report_file_name("Okhla"), "Okhla_Pollution_Report.txt");
    }

    #[test]
    fn report_includes_reading_and_sources() {
        let dataset = Dataset::bundled().unwrap();
        let ward = dataset.ward("ward-002").unwrap();
        let text = render_report(
            ward,
            dataset.pollution_level("ward-002"),
            dataset.pollution_sources("ward-002"),
            date(),
        );

        assert!(text.starts_with("Ward-Wise Pollution Report\n"));
        assert!(text.contains("Ward: Anand Vihar\n"));
        assert!(text.contains("Generated: 2024-11-15\n"));
        assert!(text.contains("Current AQI: 412 (Severe)\n"));
        assert!(text.contains("  - Vehicular Traffic (42%)\n"));
    }

    #[test]
    fn report_without_reading_or_sources() {
        let dataset = Dataset::bundled().unwrap();
        let ward = dataset.ward("ward-010").unwrap();
        let text = render_report(ward, None, &[], date());

        assert!(text.contains("Current AQI: not available\n"));
        assert!(!text.contains("Major sources:"));
    }
}
