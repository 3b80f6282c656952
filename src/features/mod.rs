//! Per-password features
//!
//! Each module extracts one aspect of a single password.

mod classes;
mod entropy;
mod pattern;

pub use classes::{CharacterClasses, extract_classes};
pub use entropy::estimate_entropy;
pub use pattern::has_common_pattern;

/// Derived composition flags of one password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureSet {
    pub length: usize,
    pub has_upper: bool,
    pub has_lower: bool,
    pub has_digit: bool,
    pub has_symbol: bool,
    pub has_common_pattern: bool,
}

impl FeatureSet {
    pub fn new(classes: CharacterClasses, has_common_pattern: bool) -> Self {
        Self {
            length: classes.length,
            has_upper: classes.has_upper,
            has_lower: classes.has_lower,
            has_digit: classes.has_digit,
            has_symbol: classes.has_symbol,
            has_common_pattern,
        }
    }
}
