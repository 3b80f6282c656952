//! Policy recommendations derived from a dataset summary.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::aggregate::DatasetSummary;

/// Limits checked by the recommender.
///
/// Prevalence limits are fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub min_mean_length: f64,
    pub min_upper_prevalence: f64,
    pub min_digit_prevalence: f64,
    pub min_symbol_prevalence: f64,
    pub max_common_pattern_prevalence: f64,
    pub min_mean_entropy: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_mean_length: 12.0,
            min_upper_prevalence: 0.8,
            min_digit_prevalence: 0.8,
            min_symbol_prevalence: 0.5,
            max_common_pattern_prevalence: 0.05,
            min_mean_entropy: 50.0,
        }
    }
}

/// A single policy advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    RaiseMinimumLength,
    EncourageUppercase,
    RequireDigit,
    RequireSymbols,
    EliminateCommonPatterns,
    IncreaseEntropy,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Self::RaiseMinimumLength => "Raise the recommended minimum length to 12+ characters.",
            Self::EncourageUppercase => "Encourage the use of uppercase letters.",
            Self::RequireDigit => "Require at least one digit.",
            Self::RequireSymbols => "Consider requiring special characters.",
            Self::EliminateCommonPatterns => "Eliminate common, easily guessable patterns.",
            Self::IncreaseEntropy => "Promote passwords with higher entropy (more randomness).",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Ordered advisories for a dataset; empty when every threshold passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecommendationSet(Vec<Recommendation>);

impl RecommendationSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, recommendation: Recommendation) -> bool {
        self.0.contains(&recommendation)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recommendation> {
        self.0.iter()
    }

    pub fn messages(&self) -> Vec<&'static str> {
        self.0.iter().map(Recommendation::message).collect()
    }
}

/// Applies every threshold rule to `summary`, in fixed order.
pub fn recommend(summary: &DatasetSummary, thresholds: &Thresholds) -> RecommendationSet {
    let prevalence = &summary.prevalence;
    let rules = [
        (
            summary.length.mean < thresholds.min_mean_length,
            Recommendation::RaiseMinimumLength,
        ),
        (
            prevalence.upper < thresholds.min_upper_prevalence,
            Recommendation::EncourageUppercase,
        ),
        (
            prevalence.digit < thresholds.min_digit_prevalence,
            Recommendation::RequireDigit,
        ),
        (
            prevalence.symbol < thresholds.min_symbol_prevalence,
            Recommendation::RequireSymbols,
        ),
        (
            prevalence.common_pattern > thresholds.max_common_pattern_prevalence,
            Recommendation::EliminateCommonPatterns,
        ),
        (
            summary.entropy.mean < thresholds.min_mean_entropy,
            Recommendation::IncreaseEntropy,
        ),
    ];

    RecommendationSet(
        rules
            .into_iter()
            .filter_map(|(fires, recommendation)| fires.then_some(recommendation))
            .collect(),
    )
}
