//! Password policy analysis library
//!
//! This library estimates the strength of every password in a dataset and
//! turns the aggregate picture into password policy recommendations.
//!
//! # Features
//!
//! - `async` (default): Enables cancellation, channel delivery and partitioned summaries
//! - `tracing`: Enables logging via tracing crate
//! - `cli` (default): Builds the `pwd-policy` binary
//!
//! # Environment Variables
//!
//! - `PWD_POLICY_PATTERNS_PATH`: Custom weak pattern list file, one pattern per line
//!   (default: built-in list)
//!
//! # Example
//!
//! ```rust
//! use pwd_policy::{AnalyzerConfig, PasswordRecord, audit};
//!
//! let passwords: Vec<PasswordRecord> = ["abc123", "Qwerty!1", "Xk9#mP2qLz"]
//!     .into_iter()
//!     .map(PasswordRecord::from)
//!     .collect();
//! let config = AnalyzerConfig::default();
//!
//! #[cfg(feature = "async")]
//! let (_records, report) = audit(passwords, &config, None).expect("non-empty dataset");
//!
//! #[cfg(not(feature = "async"))]
//! let (_records, report) = audit(passwords, &config).expect("non-empty dataset");
//!
//! assert_eq!(report.summary.count, 3);
//! for suggestion in report.recommendations.iter() {
//!     println!("- {}", suggestion);
//! }
//! ```

mod aggregate;
mod analyzer;
mod config;
mod error;
mod features;
mod patterns;
mod policy;

pub mod chart;
pub mod loader;
pub mod report;

// Public API
pub use aggregate::{DatasetAccumulator, DatasetSummary, Percentiles, Prevalence, QUANTILES, SeriesStats, summarize};
pub use analyzer::{AnalysisRecord, PasswordRecord, analyze_dataset, analyze_password, audit};
pub use config::AnalyzerConfig;
pub use error::AnalysisError;
pub use features::{CharacterClasses, FeatureSet, estimate_entropy, extract_classes, has_common_pattern};
pub use patterns::{DEFAULT_PATTERNS, PATTERNS_PATH_ENV, PatternList, PatternListError};
pub use policy::{Recommendation, RecommendationSet, Thresholds, recommend};
pub use report::PolicyReport;

#[cfg(feature = "async")]
pub use aggregate::summarize_partitioned;

#[cfg(feature = "async")]
pub use analyzer::analyze_dataset_tx;
