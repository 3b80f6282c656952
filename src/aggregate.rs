//! Dataset aggregation - summary statistics over analyzed passwords.

use serde::Serialize;

#[cfg(feature = "async")]
use std::sync::Arc;

#[cfg(feature = "async")]
use crate::analyzer::{PasswordRecord, analyze_password};
use crate::analyzer::AnalysisRecord;
use crate::error::AnalysisError;
#[cfg(feature = "async")]
use crate::patterns::PatternList;

/// Quantile levels reported for length and entropy.
pub const QUANTILES: [f64; 4] = [0.25, 0.5, 0.75, 0.9];

/// Percentiles of a numeric series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Percentiles {
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

impl Percentiles {
    /// `(level, value)` pairs in ascending order.
    pub fn levels(&self) -> [(f64, f64); 4] {
        [
            (QUANTILES[0], self.p25),
            (QUANTILES[1], self.p50),
            (QUANTILES[2], self.p75),
            (QUANTILES[3], self.p90),
        ]
    }
}

/// Mean, extremes and percentiles of a numeric series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub percentiles: Percentiles,
}

/// Fraction in `[0, 1]` of passwords showing each feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prevalence {
    pub upper: f64,
    pub lower: f64,
    pub digit: f64,
    pub symbol: f64,
    pub common_pattern: f64,
}

/// Aggregated view of a whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub count: usize,
    pub length: SeriesStats,
    pub entropy: SeriesStats,
    pub prevalence: Prevalence,
}

/// Running totals for a (partial) dataset.
///
/// Accumulators built over disjoint partitions can be merged; merging in
/// input order yields the same summary as a single sequential pass.
#[derive(Debug, Clone, Default)]
pub struct DatasetAccumulator {
    lengths: Vec<f64>,
    entropies: Vec<f64>,
    upper: usize,
    lower: usize,
    digit: usize,
    symbol: usize,
    common_pattern: usize,
}

impl DatasetAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.lengths.len()
    }

    pub fn push(&mut self, record: &AnalysisRecord) {
        let features = &record.features;
        self.lengths.push(features.length as f64);
        self.entropies.push(record.entropy);
        self.upper += usize::from(features.has_upper);
        self.lower += usize::from(features.has_lower);
        self.digit += usize::from(features.has_digit);
        self.symbol += usize::from(features.has_symbol);
        self.common_pattern += usize::from(features.has_common_pattern);
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.lengths.extend(other.lengths);
        self.entropies.extend(other.entropies);
        self.upper += other.upper;
        self.lower += other.lower;
        self.digit += other.digit;
        self.symbol += other.symbol;
        self.common_pattern += other.common_pattern;
        self
    }

    /// Computes the summary.
    ///
    /// # Errors
    ///
    /// Returns `EmptyDataset` if nothing was accumulated.
    pub fn finish(self) -> Result<DatasetSummary, AnalysisError> {
        let count = self.count();
        if count == 0 {
            return Err(AnalysisError::EmptyDataset);
        }

        let total = count as f64;
        Ok(DatasetSummary {
            count,
            length: series_stats(self.lengths),
            entropy: series_stats(self.entropies),
            prevalence: Prevalence {
                upper: self.upper as f64 / total,
                lower: self.lower as f64 / total,
                digit: self.digit as f64 / total,
                symbol: self.symbol as f64 / total,
                common_pattern: self.common_pattern as f64 / total,
            },
        })
    }
}

impl<'a> FromIterator<&'a AnalysisRecord> for DatasetAccumulator {
    fn from_iter<I: IntoIterator<Item = &'a AnalysisRecord>>(iter: I) -> Self {
        let mut acc = Self::new();
        for record in iter {
            acc.push(record);
        }
        acc
    }
}

/// Summarizes analyzed records.
///
/// # Errors
///
/// Returns `EmptyDataset` if `records` is empty.
pub fn summarize(records: &[AnalysisRecord]) -> Result<DatasetSummary, AnalysisError> {
    records.iter().collect::<DatasetAccumulator>().finish()
}

/// Analyzes and summarizes `passwords` in partitions on the blocking pool.
///
/// Partial accumulators are merged in input order.
///
/// # Errors
///
/// Returns `EmptyDataset` if `passwords` is empty, or `Worker` if a
/// partition task panicked.
#[cfg(feature = "async")]
pub async fn summarize_partitioned(
    passwords: Vec<PasswordRecord>,
    patterns: Arc<PatternList>,
    chunk_size: usize,
) -> Result<DatasetSummary, AnalysisError> {
    if passwords.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }

    let chunk_size = chunk_size.max(1);
    let mut handles = Vec::with_capacity(passwords.len().div_ceil(chunk_size));
    let mut remaining = passwords.into_iter().peekable();

    while remaining.peek().is_some() {
        let chunk: Vec<PasswordRecord> = remaining.by_ref().take(chunk_size).collect();
        let patterns = Arc::clone(&patterns);

        #[cfg(feature = "tracing")]
        tracing::debug!("Spawning partition {} ({} passwords)", handles.len(), chunk.len());

        handles.push(tokio::task::spawn_blocking(move || {
            let mut acc = DatasetAccumulator::new();
            for password in chunk {
                acc.push(&analyze_password(password, &patterns));
            }
            acc
        }));
    }

    let mut total = DatasetAccumulator::new();
    for handle in handles {
        let partial = handle
            .await
            .map_err(|e| AnalysisError::Worker(e.to_string()))?;
        total = total.merge(partial);
    }
    total.finish()
}

fn series_stats(mut values: Vec<f64>) -> SeriesStats {
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.sort_by(f64::total_cmp);

    SeriesStats {
        mean,
        min: values[0],
        max: values[values.len() - 1],
        percentiles: Percentiles {
            p25: quantile(&values, QUANTILES[0]),
            p50: quantile(&values, QUANTILES[1]),
            p75: quantile(&values, QUANTILES[2]),
            p90: quantile(&values, QUANTILES[3]),
        },
    }
}

/// Linear-interpolation quantile of an ascending, non-empty series.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{PasswordRecord, analyze_password};
    use crate::patterns::PatternList;

    const EPSILON: f64 = 1e-9;

    fn analyzed(passwords: &[&str]) -> Vec<AnalysisRecord> {
        let patterns = PatternList::default();
        passwords
            .iter()
            .map(|p| analyze_password(PasswordRecord::from(*p), &patterns))
            .collect()
    }

    #[test]
    fn test_summarize_empty_dataset() {
        assert!(matches!(summarize(&[]), Err(AnalysisError::EmptyDataset)));
    }

    #[test]
    fn test_summarize_single_record() {
        let summary = summarize(&analyzed(&["Qwerty!1"])).unwrap();
        assert_eq!(summary.count, 1);

        for stats in [summary.length, summary.entropy] {
            assert_eq!(stats.min, stats.mean);
            assert_eq!(stats.max, stats.mean);
            for (_, value) in stats.percentiles.levels() {
                assert_eq!(value, stats.mean);
            }
        }
        assert_eq!(summary.length.mean, 8.0);
    }

    #[test]
    fn test_summarize_reference_set() {
        let summary = summarize(&analyzed(&["abc123", "Qwerty!1", "Xk9#mP2qLz"])).unwrap();

        assert_eq!(summary.count, 3);
        assert!((summary.length.mean - 8.0).abs() < EPSILON);
        assert_eq!(summary.length.min, 6.0);
        assert_eq!(summary.length.max, 10.0);
        assert!((summary.length.percentiles.p25 - 7.0).abs() < EPSILON);
        assert!((summary.length.percentiles.p50 - 8.0).abs() < EPSILON);
        assert!((summary.length.percentiles.p75 - 9.0).abs() < EPSILON);
        assert!((summary.length.percentiles.p90 - 9.6).abs() < EPSILON);

        assert!((summary.prevalence.common_pattern - 2.0 / 3.0).abs() < EPSILON);
        assert!((summary.prevalence.symbol - 2.0 / 3.0).abs() < EPSILON);
        assert!((summary.prevalence.digit - 1.0).abs() < EPSILON);
        assert!((summary.prevalence.upper - 2.0 / 3.0).abs() < EPSILON);
        assert!((summary.prevalence.lower - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_summarize_entropy_bounds() {
        let records = analyzed(&["", "abcd", "Password1!"]);
        let summary = summarize(&records).unwrap();
        assert_eq!(summary.entropy.min, 0.0);
        assert!((summary.entropy.max - 10.0 * 94f64.log2()).abs() < EPSILON);
    }

    #[test]
    fn test_quantile_interpolation() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile(&values, 0.25) - 1.75).abs() < EPSILON);
        assert!((quantile(&values, 0.5) - 2.5).abs() < EPSILON);
        assert!((quantile(&values, 0.9) - 3.7).abs() < EPSILON);
        assert_eq!(quantile(&values, 0.0), 1.0);
        assert_eq!(quantile(&values, 1.0), 4.0);
    }

    #[test]
    fn test_merge_matches_sequential() {
        let records = analyzed(&["abc123", "Qwerty!1", "Xk9#mP2qLz", "letmein", "S3cure_Pass"]);
        let sequential = summarize(&records).unwrap();

        let (left, right) = records.split_at(2);
        let merged = left
            .iter()
            .collect::<DatasetAccumulator>()
            .merge(right.iter().collect())
            .finish()
            .unwrap();

        assert_eq!(merged.count, sequential.count);
        assert_eq!(merged.length, sequential.length);
        assert_eq!(merged.prevalence, sequential.prevalence);
        assert!((merged.entropy.mean - sequential.entropy.mean).abs() < EPSILON);
    }

    #[test]
    fn test_finish_empty_accumulator() {
        let acc = DatasetAccumulator::new();
        assert!(matches!(acc.finish(), Err(AnalysisError::EmptyDataset)));
    }
}
