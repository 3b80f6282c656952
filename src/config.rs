//! Analyzer configuration
//!
//! Everything the analysis depends on is carried in an explicit value, so
//! callers and tests can swap pattern lists or thresholds freely.

use crate::patterns::{PatternList, PatternListError};
use crate::policy::Thresholds;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzerConfig {
    pub patterns: PatternList,
    pub thresholds: Thresholds,
}

impl AnalyzerConfig {
    pub fn new(patterns: PatternList, thresholds: Thresholds) -> Self {
        Self { patterns, thresholds }
    }

    /// Builds a configuration with default thresholds and the pattern list
    /// resolved from `PWD_POLICY_PATTERNS_PATH`.
    ///
    /// # Errors
    ///
    /// Returns error if the variable names a missing, unreadable or empty file.
    pub fn from_env() -> Result<Self, PatternListError> {
        Ok(Self {
            patterns: PatternList::from_env()?,
            thresholds: Thresholds::default(),
        })
    }
}
