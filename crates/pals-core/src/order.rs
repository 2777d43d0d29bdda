//! # Multipole Order Grammar
//!
//! The order of a multipole field is the decimal index trailing its prefix
//! (`Bn3` has order 3). Every prefix family shares this one grammar:
//! a non-empty run of ASCII digits that is either exactly `"0"` or does not
//! start with `'0'`.
//!
//! Non-ASCII digits (e.g. Arabic-Indic numerals) are rejected. Field names
//! are part of the interchange format and must stay ASCII.

/// Returns `true` if `token` is a valid multipole order.
///
/// ```
/// use pals_core::order::is_valid_order;
///
/// assert!(is_valid_order("0"));
/// assert!(is_valid_order("12"));
/// assert!(!is_valid_order("01"));
/// assert!(!is_valid_order(""));
/// assert!(!is_valid_order("-1"));
/// ```
pub fn is_valid_order(token: &str) -> bool {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    token == "0" || !token.starts_with('0')
}

/// Numeric value of a valid order token, if it fits in a `u32`.
///
/// Orders beyond `u32::MAX` are grammatically valid but have no
/// numeric view.
pub fn order_value(token: &str) -> Option<u32> {
    if !is_valid_order(token) {
        return None;
    }
    token.parse().ok()
}
