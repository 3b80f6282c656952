//! Report rendering and persistence.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::aggregate::{DatasetSummary, SeriesStats};
use crate::analyzer::AnalysisRecord;
use crate::policy::RecommendationSet;

/// Summary and recommendations of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyReport {
    pub summary: DatasetSummary,
    pub recommendations: RecommendationSet,
}

impl PolicyReport {
    /// Human-readable rendering, see [`render_text`].
    pub fn to_text(&self) -> String {
        render_text(&self.summary, &self.recommendations)
    }
}

/// One line of the analysed-CSV export.
#[derive(Serialize)]
struct AnalysisRow<'a> {
    password: &'a str,
    length: usize,
    has_upper: bool,
    has_lower: bool,
    has_digit: bool,
    has_symbol: bool,
    common_pattern: bool,
    entropy: f64,
}

impl<'a> From<&'a AnalysisRecord> for AnalysisRow<'a> {
    fn from(record: &'a AnalysisRecord) -> Self {
        let features = &record.features;
        Self {
            password: record.password.expose(),
            length: features.length,
            has_upper: features.has_upper,
            has_lower: features.has_lower,
            has_digit: features.has_digit,
            has_symbol: features.has_symbol,
            common_pattern: features.has_common_pattern,
            entropy: record.entropy,
        }
    }
}

/// Renders the report as plain text.
pub fn render_text(summary: &DatasetSummary, recommendations: &RecommendationSet) -> String {
    let mut out = String::new();
    let length = &summary.length;
    let entropy = &summary.entropy;
    let prevalence = &summary.prevalence;

    // Writing into a String cannot fail.
    let _ = writeln!(out, "=== PASSWORD POLICY REPORT ===\n");
    let _ = writeln!(out, "Passwords analyzed: {}", summary.count);
    let _ = writeln!(out, "Mean length: {:.2}", length.mean);
    let _ = writeln!(out, "Length min/max: {} / {}", length.min, length.max);
    let _ = writeln!(out, "Mean estimated entropy (bits): {:.2}", entropy.mean);
    let _ = writeln!(out, "Entropy min/max: {:.2} / {:.2}\n", entropy.min, entropy.max);

    for (label, value) in [
        ("has_upper", prevalence.upper),
        ("has_lower", prevalence.lower),
        ("has_digit", prevalence.digit),
        ("has_symbol", prevalence.symbol),
        ("common_pattern", prevalence.common_pattern),
    ] {
        let _ = writeln!(out, "Share with {}: {:.1}%", label, value * 100.0);
    }

    write_percentiles(&mut out, "Password length percentiles:", length);
    write_percentiles(&mut out, "Estimated entropy percentiles:", entropy);

    let _ = writeln!(out, "\n--- Suggestions ---");
    if recommendations.is_empty() {
        let _ = writeln!(out, "No suggestions: every policy threshold is met.");
    }
    for recommendation in recommendations.iter() {
        let _ = writeln!(out, "- {}", recommendation);
    }

    out
}

fn write_percentiles(out: &mut String, title: &str, stats: &SeriesStats) {
    let _ = writeln!(out, "\n{}", title);
    for (level, value) in stats.percentiles.levels() {
        let _ = writeln!(out, "{:<6}{:.2}", format!("{:.2}", level), value);
    }
}

/// Saves one CSV row per analyzed password.
///
/// # Errors
///
/// Returns error if the file cannot be created or written.
pub fn save_analysis_csv<P: AsRef<Path>>(path: P, records: &[AnalysisRecord]) -> Result<(), csv::Error> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(AnalysisRow::from(record))?;
    }
    writer.flush()?;

    #[cfg(feature = "tracing")]
    tracing::info!("Report saved to {:?}", path);

    Ok(())
}
