//! Password analyzer - per-password analysis and dataset orchestration.

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::aggregate::summarize;
use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::features::{FeatureSet, estimate_entropy, extract_classes, has_common_pattern};
use crate::patterns::PatternList;
use crate::policy::recommend;
use crate::report::PolicyReport;

/// A single password exactly as supplied, with no normalization.
///
/// The plaintext is kept behind a [`SecretString`] so it never shows up in
/// `Debug` output.
#[derive(Debug)]
pub struct PasswordRecord(SecretString);

impl PasswordRecord {
    pub fn new(password: impl Into<String>) -> Self {
        Self(SecretString::from(password.into()))
    }

    /// Builds a record from raw bytes at position `index` of the input.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the bytes are not valid UTF-8.
    pub fn from_bytes(index: usize, bytes: Vec<u8>) -> Result<Self, AnalysisError> {
        String::from_utf8(bytes)
            .map(Self::new)
            .map_err(|e| AnalysisError::invalid_input(index, format!("not a valid string ({})", e)))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<&str> for PasswordRecord {
    fn from(password: &str) -> Self {
        Self::new(password)
    }
}

impl From<String> for PasswordRecord {
    fn from(password: String) -> Self {
        Self::new(password)
    }
}

/// A password together with everything derived from it.
#[derive(Debug)]
pub struct AnalysisRecord {
    pub password: PasswordRecord,
    pub features: FeatureSet,
    /// Heuristic strength in bits.
    pub entropy: f64,
}

/// Analyzes a single password.
///
/// Runs the character class extraction, the pattern match and the entropy
/// estimate once each and merges the results.
pub fn analyze_password(password: PasswordRecord, patterns: &PatternList) -> AnalysisRecord {
    let pwd = password.expose();
    let classes = extract_classes(pwd);
    let common = has_common_pattern(pwd, patterns);
    let entropy = estimate_entropy(pwd);

    AnalysisRecord {
        features: FeatureSet::new(classes, common),
        entropy,
        password,
    }
}

/// Analyzes every password of a dataset, preserving input order.
///
/// # Arguments
/// * `passwords` - The passwords to analyze
/// * `patterns` - Weak substrings to look for
/// * `token` - Optional cancellation token (async feature only)
///
/// # Errors
///
/// Returns `Cancelled` if the token fires before all passwords are analyzed.
pub fn analyze_dataset(
    passwords: Vec<PasswordRecord>,
    patterns: &PatternList,
    #[cfg(feature = "async")] token: Option<&CancellationToken>,
) -> Result<Vec<AnalysisRecord>, AnalysisError> {
    #[cfg(feature = "tracing")]
    tracing::info!("Starting analysis of {} passwords", passwords.len());

    let mut records = Vec::with_capacity(passwords.len());
    for password in passwords {
        #[cfg(feature = "async")]
        {
            if token.is_some_and(|t| t.is_cancelled()) {
                #[cfg(feature = "tracing")]
                tracing::warn!("Analysis cancelled after {} passwords", records.len());
                return Err(AnalysisError::Cancelled);
            }
        }

        records.push(analyze_password(password, patterns));
    }

    #[cfg(feature = "tracing")]
    tracing::info!("Analysis completed");

    Ok(records)
}

/// Runs the whole pipeline: analysis, summary and recommendations.
pub fn audit(
    passwords: Vec<PasswordRecord>,
    config: &AnalyzerConfig,
    #[cfg(feature = "async")] token: Option<&CancellationToken>,
) -> Result<(Vec<AnalysisRecord>, PolicyReport), AnalysisError> {
    #[cfg(feature = "async")]
    let records = analyze_dataset(passwords, &config.patterns, token)?;

    #[cfg(not(feature = "async"))]
    let records = analyze_dataset(passwords, &config.patterns)?;

    let summary = summarize(&records)?;
    let recommendations = recommend(&summary, &config.thresholds);
    Ok((records, PolicyReport { summary, recommendations }))
}

/// Async version that sends the finished report via channel.
#[cfg(feature = "async")]
pub async fn analyze_dataset_tx(
    passwords: Vec<PasswordRecord>,
    config: &AnalyzerConfig,
    token: CancellationToken,
    tx: mpsc::Sender<Result<PolicyReport, AnalysisError>>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("dataset analysis is about to start...");

    let outcome = audit(passwords, config, Some(&token)).map(|(_, report)| report);

    if let Err(_e) = tx.send(outcome).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send policy report: {}", _e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(passwords: &[&str]) -> Vec<PasswordRecord> {
        passwords.iter().map(|p| PasswordRecord::from(*p)).collect()
    }

    fn run(passwords: &[&str]) -> Result<Vec<AnalysisRecord>, AnalysisError> {
        let patterns = PatternList::default();

        #[cfg(feature = "async")]
        let result = analyze_dataset(records(passwords), &patterns, None);

        #[cfg(not(feature = "async"))]
        let result = analyze_dataset(records(passwords), &patterns);

        result
    }

    #[test]
    fn test_analyze_empty_password() {
        let record = analyze_password(PasswordRecord::from(""), &PatternList::default());
        assert_eq!(record.features, FeatureSet::default());
        assert_eq!(record.entropy, 0.0);
    }

    #[test]
    fn test_analyze_preserves_password_verbatim() {
        let record = analyze_password(PasswordRecord::from("  Mixed Case "), &PatternList::default());
        assert_eq!(record.password.expose(), "  Mixed Case ");
        assert_eq!(record.features.length, 13);
    }

    #[test]
    fn test_analyze_common_pattern_ignores_case() {
        let record = analyze_password(PasswordRecord::from("MyPassWord2024"), &PatternList::default());
        assert!(record.features.has_common_pattern);
        assert!(record.features.has_upper);
        assert!(record.features.has_digit);
        assert!(!record.features.has_symbol);
    }

    #[test]
    fn test_analyze_dataset_reference_set() {
        let analyzed = run(&["abc123", "Qwerty!1", "Xk9#mP2qLz"]).unwrap();

        let lengths: Vec<_> = analyzed.iter().map(|r| r.features.length).collect();
        assert_eq!(lengths, vec![6, 8, 10]);

        let common: Vec<_> = analyzed.iter().map(|r| r.features.has_common_pattern).collect();
        assert_eq!(common, vec![true, true, false]);

        let symbols: Vec<_> = analyzed.iter().map(|r| r.features.has_symbol).collect();
        assert_eq!(symbols, vec![false, true, true]);
    }

    #[test]
    fn test_entropy_zero_iff_no_class() {
        let analyzed = run(&["", "a", "__", "Pa55w0rd!"]).unwrap();
        for record in &analyzed {
            let any_class = record.features.has_upper
                || record.features.has_lower
                || record.features.has_digit
                || record.features.has_symbol;
            assert!(record.entropy >= 0.0);
            assert_eq!(record.entropy == 0.0, !any_class);
        }
    }

    #[test]
    fn test_from_bytes_invalid_utf8() {
        let result = PasswordRecord::from_bytes(4, vec![0x66, 0xff, 0xfe]);
        assert!(matches!(result, Err(AnalysisError::InvalidInput { index: 4, .. })));
    }

    #[test]
    fn test_debug_does_not_leak_password() {
        let record = PasswordRecord::from("hunter2");
        assert!(!format!("{:?}", record).contains("hunter2"));
    }

    #[test]
    fn test_audit_empty_dataset() {
        let config = AnalyzerConfig::default();

        #[cfg(feature = "async")]
        let result = audit(Vec::new(), &config, None);

        #[cfg(not(feature = "async"))]
        let result = audit(Vec::new(), &config);

        assert!(matches!(result, Err(AnalysisError::EmptyDataset)));
    }

    #[test]
    fn test_audit_weak_dataset_recommendations() {
        let config = AnalyzerConfig::default();

        #[cfg(feature = "async")]
        let result = audit(records(&["abc123", "qwerty", "letmein"]), &config, None);

        #[cfg(not(feature = "async"))]
        let result = audit(records(&["abc123", "qwerty", "letmein"]), &config);

        let (analyzed, report) = result.unwrap();
        assert_eq!(analyzed.len(), 3);
        assert_eq!(report.summary.count, 3);
        assert_eq!(report.recommendations.len(), 6);
    }
}

#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;

    fn records(passwords: &[&str]) -> Vec<PasswordRecord> {
        passwords.iter().map(|p| PasswordRecord::from(*p)).collect()
    }

    #[tokio::test]
    async fn test_analyze_with_cancellation() {
        let token = CancellationToken::new();
        token.cancel();

        let result = analyze_dataset(records(&["abc123", "Qwerty!1"]), &PatternList::default(), Some(&token));
        assert!(matches!(result, Err(AnalysisError::Cancelled)));
    }

    #[tokio::test]
    async fn test_analyze_without_cancellation() {
        let token = CancellationToken::new();

        let result = analyze_dataset(records(&["abc123", "Qwerty!1"]), &PatternList::default(), Some(&token));
        assert_eq!(result.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_analyze_dataset_tx() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();
        let config = AnalyzerConfig::default();

        analyze_dataset_tx(records(&["abc123", "Qwerty!1", "Xk9#mP2qLz"]), &config, token, tx).await;

        let report = rx.recv().await.expect("Should receive report").unwrap();
        assert_eq!(report.summary.count, 3);
        assert!((report.summary.length.mean - 8.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_analyze_dataset_tx_cancelled() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();
        token.cancel();

        analyze_dataset_tx(records(&["abc123"]), &AnalyzerConfig::default(), token, tx).await;

        let outcome = rx.recv().await.expect("Should receive outcome");
        assert!(matches!(outcome, Err(AnalysisError::Cancelled)));
    }
}
