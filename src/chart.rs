//! Terminal charts for an analyzed dataset.
//!
//! Purely decorative: nothing in the analysis depends on this module.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::aggregate::DatasetSummary;
use crate::analyzer::AnalysisRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    /// Width in characters of the longest bar.
    pub width: usize,
    pub entropy_bins: usize,
    /// Number of most used passwords listed.
    pub top: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 40,
            entropy_bins: 10,
            top: 10,
        }
    }
}

/// Count of passwords per length, one bin per length from min to max.
pub fn length_histogram(records: &[AnalysisRecord]) -> Vec<(usize, usize)> {
    let lengths = records.iter().map(|r| r.features.length);
    let (Some(min), Some(max)) = (lengths.clone().min(), lengths.clone().max()) else {
        return Vec::new();
    };

    let mut counts = vec![0usize; max - min + 1];
    for length in lengths {
        counts[length - min] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(offset, count)| (min + offset, count))
        .collect()
}

/// Count of passwords per equal-width entropy range, as `(start, end, count)`.
pub fn entropy_histogram(records: &[AnalysisRecord], bins: usize) -> Vec<(f64, f64, usize)> {
    if records.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = records.iter().map(|r| r.entropy).fold(f64::INFINITY, f64::min);
    let max = records.iter().map(|r| r.entropy).fold(f64::NEG_INFINITY, f64::max);
    if max == min {
        return vec![(min, max, records.len())];
    }

    let step = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for record in records {
        let bin = (((record.entropy - min) / step).floor() as usize).min(bins - 1);
        counts[bin] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| (min + step * i as f64, min + step * (i + 1) as f64, count))
        .collect()
}

/// Most frequent passwords, ties broken by first appearance.
pub fn top_passwords(records: &[AnalysisRecord], n: usize) -> Vec<(&str, usize)> {
    let mut seen: HashMap<&str, (usize, usize)> = HashMap::new();
    for (index, record) in records.iter().enumerate() {
        seen.entry(record.password.expose()).or_insert((0, index)).0 += 1;
    }

    let mut ranked: Vec<_> = seen.into_iter().collect();
    ranked.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
        count_b.cmp(count_a).then(first_a.cmp(first_b))
    });
    ranked
        .into_iter()
        .take(n)
        .map(|(password, (count, _))| (password, count))
        .collect()
}

fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * width as f64).round() as usize;
    "#".repeat(filled.min(width))
}

/// Renders every chart into one block of text.
pub fn render_charts(records: &[AnalysisRecord], summary: &DatasetSummary, options: &ChartOptions) -> String {
    let mut out = String::new();
    let width = options.width;

    let _ = writeln!(out, "Password length distribution");
    let lengths = length_histogram(records);
    let peak = lengths.iter().map(|(_, c)| *c).max().unwrap_or(0) as f64;
    for (length, count) in &lengths {
        let _ = writeln!(out, "{:>5} | {} {}", length, bar(*count as f64, peak, width), count);
    }

    let _ = writeln!(out, "\nEstimated entropy distribution (bits)");
    let entropies = entropy_histogram(records, options.entropy_bins);
    let peak = entropies.iter().map(|(_, _, c)| *c).max().unwrap_or(0) as f64;
    for (start, end, count) in &entropies {
        let label = format!("{:.1}-{:.1}", start, end);
        let _ = writeln!(out, "{:>13} | {} {}", label, bar(*count as f64, peak, width), count);
    }

    let _ = writeln!(out, "\nPassword features (%)");
    let prevalence = &summary.prevalence;
    for (label, value) in [
        ("Uppercase", prevalence.upper),
        ("Lowercase", prevalence.lower),
        ("Digits", prevalence.digit),
        ("Symbols", prevalence.symbol),
        ("Common patterns", prevalence.common_pattern),
    ] {
        let _ = writeln!(out, "{:>15} | {} {:.1}%", label, bar(value, 1.0, width), value * 100.0);
    }

    let _ = writeln!(out, "\nTop {} most used passwords", options.top);
    let top = top_passwords(records, options.top);
    let peak = top.first().map(|(_, c)| *c).unwrap_or(0) as f64;
    for (password, count) in &top {
        let _ = writeln!(out, "{:>20} | {} {}", password, bar(*count as f64, peak, width), count);
    }

    out
}
