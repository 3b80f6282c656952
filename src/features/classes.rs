//! Character classes - detects uppercase, lowercase, digits and symbols.

/// Character composition of a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharacterClasses {
    pub has_upper: bool,
    pub has_lower: bool,
    pub has_digit: bool,
    pub has_symbol: bool,
    pub length: usize,
}

impl CharacterClasses {
    /// Size of the alphabet the password is assumed to be drawn from.
    ///
    /// Each detected class contributes its full alphabet: 26 lowercase,
    /// 26 uppercase, 10 digits and 32 common symbols.
    pub fn pool_size(&self) -> u32 {
        [
            (self.has_lower, 26),
            (self.has_upper, 26),
            (self.has_digit, 10),
            (self.has_symbol, 32),
        ]
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, size)| size)
        .sum()
    }
}

/// Anything outside `[A-Za-z0-9]` is a symbol, underscore included.
fn is_symbol(c: char) -> bool {
    !c.is_ascii_alphanumeric()
}

/// Classifies the characters of `pwd`. Letters and digits are ASCII only.
pub fn extract_classes(pwd: &str) -> CharacterClasses {
    CharacterClasses {
        has_upper: pwd.chars().any(|c| c.is_ascii_uppercase()),
        has_lower: pwd.chars().any(|c| c.is_ascii_lowercase()),
        has_digit: pwd.chars().any(|c| c.is_ascii_digit()),
        has_symbol: pwd.chars().any(is_symbol),
        length: pwd.chars().count(),
    }
}
