//! Pattern section - detects well-known guessable substrings.

use crate::patterns::PatternList;

/// Returns `true` if any pattern occurs anywhere in `pwd`, ignoring case.
///
/// Matching is plain substring containment and stops at the first hit.
pub fn has_common_pattern(pwd: &str, patterns: &PatternList) -> bool {
    let lowered = pwd.to_lowercase();
    patterns.iter().any(|pattern| lowered.contains(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_case_insensitive() {
        let patterns = PatternList::default();
        assert!(has_common_pattern("MyPassWord2024", &patterns));
        assert!(has_common_pattern("QWERTY", &patterns));
    }

    #[test]
    fn test_pattern_substring_anywhere() {
        let patterns = PatternList::default();
        assert!(has_common_pattern("Sabcool", &patterns));
        assert!(has_common_pattern("x9_root_y", &patterns));
    }

    #[test]
    fn test_pattern_strong_password() {
        let patterns = PatternList::default();
        assert!(!has_common_pattern("Xk9#mP2qLz", &patterns));
    }

    #[test]
    fn test_pattern_empty_password() {
        assert!(!has_common_pattern("", &PatternList::default()));
    }

    #[test]
    fn test_pattern_custom_list() {
        let patterns = PatternList::new(["dragon"]);
        assert!(has_common_pattern("BigDRAGON!", &patterns));
        assert!(!has_common_pattern("password", &patterns));
    }

    #[test]
    fn test_pattern_empty_list_never_matches() {
        let patterns = PatternList::new(Vec::<String>::new());
        assert!(!has_common_pattern("password123", &patterns));
    }
}
