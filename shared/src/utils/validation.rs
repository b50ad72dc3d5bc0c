//! Common text validation utilities
//!
//! Lengths are counted in Unicode scalar values, not bytes, so that
//! "Sfax Médina" counts the same as the user sees it.

/// Number of characters in a string
pub fn char_count(value: &str) -> usize {
    value.chars().count()
}

/// Check if a string is not empty after trimming
pub fn not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check if a string has at least `min` characters
pub fn at_least(value: &str, min: usize) -> bool {
    char_count(value) >= min
}

/// Check if a string has at most `max` characters
pub fn at_most(value: &str, max: usize) -> bool {
    char_count(value) <= max
}
