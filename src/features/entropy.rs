//! Entropy section - heuristic bit strength from length and alphabet size.

use super::classes::extract_classes;

/// Estimates the entropy of `pwd` in bits as `length * log2(pool_size)`.
///
/// This is the theoretical maximum for a uniformly random choice from every
/// detected class, so dictionary words decorated with a digit and a symbol
/// score as if they were random. Returns `0.0` when no class is present.
pub fn estimate_entropy(pwd: &str) -> f64 {
    let classes = extract_classes(pwd);
    let pool_size = classes.pool_size();
    if pool_size == 0 {
        return 0.0;
    }
    classes.length as f64 * f64::from(pool_size).log2()
}
