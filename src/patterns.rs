//! Weak pattern list management
//!
//! Handles loading the list of guessable substrings used by the pattern matcher.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable pointing at a custom pattern list file.
pub const PATTERNS_PATH_ENV: &str = "PWD_POLICY_PATTERNS_PATH";

/// Built-in weak substrings, in matching order.
pub const DEFAULT_PATTERNS: [&str; 15] = [
    "123", "password", "qwerty", "admin", "letmein", "abc", "welcome", "login", "user", "test",
    "guest", "root", "pass", "111", "000",
];

#[derive(Error, Debug)]
pub enum PatternListError {
    #[error("Pattern list file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read pattern list file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Pattern list file is empty")]
    EmptyFile,
}

/// Ordered list of lower-cased weak substrings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternList {
    patterns: Vec<String>,
}

impl Default for PatternList {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERNS)
    }
}

impl PatternList {
    /// Builds a list from arbitrary patterns.
    ///
    /// Patterns are trimmed and lower-cased; blank entries and repeats are dropped,
    /// keeping the first occurrence so matching order stays stable.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list: Vec<String> = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref().trim().to_lowercase();
            if !pattern.is_empty() && !list.contains(&pattern) {
                list.push(pattern);
            }
        }
        Self { patterns: list }
    }

    /// Loads a pattern list from a file with one pattern per line.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File does not exist
    /// - File cannot be read
    /// - File contains no patterns
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PatternListError> {
        let path = path.as_ref();

        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Pattern list load FAILED: FileNotFound {:?}", path);
            return Err(PatternListError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let list = Self::new(content.lines());

        if list.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::error!("Pattern list load FAILED: Empty file {:?}", path);
            return Err(PatternListError::EmptyFile);
        }

        #[cfg(feature = "tracing")]
        tracing::info!("Pattern list loaded: {} patterns from {:?}", list.len(), path);

        Ok(list)
    }

    /// Resolves the pattern list from the environment.
    ///
    /// Uses the file named by `PWD_POLICY_PATTERNS_PATH` when set,
    /// otherwise the built-in defaults.
    pub fn from_env() -> Result<Self, PatternListError> {
        match patterns_path_from_env() {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }
}

/// Returns the pattern list path configured in the environment, if any.
pub fn patterns_path_from_env() -> Option<PathBuf> {
    std::env::var(PATTERNS_PATH_ENV)
        .ok()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}
