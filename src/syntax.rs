//! Identifier syntax checks.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SID_PATTERN: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Failed to compile SId pattern");
    static ref XML_ID_PATTERN: Regex = Regex::new(r"^[\p{L}_:][\p{L}\p{N}\p{M}._:\-]*$")
        .expect("Failed to compile XML ID pattern");
}

/// Whether `value` is a valid `SId`.
///
/// SIds are used for `id` attributes and for every reference between
/// elements (`SIdRef`).
///
/// # Arguments
///
/// * `value` - The identifier to check
///
/// # Returns
///
/// `true` if the identifier starts with a letter or underscore and continues
/// with letters, digits or underscores only.
pub fn is_valid_sid(value: &str) -> bool {
    SID_PATTERN.is_match(value)
}

/// Whether `value` is a valid XML `ID`, the syntax of `metaid`.
pub fn is_valid_xml_id(value: &str) -> bool {
    XML_ID_PATTERN.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sid_syntax() {
        assert!(is_valid_sid("ds1"));
        assert!(is_valid_sid("_x_2"));
        assert!(!is_valid_sid(""));
        assert!(!is_valid_sid("1abc"));
        assert!(!is_valid_sid("a-b"));
        assert!(!is_valid_sid("a b"));
    }

    #[test]
    fn test_xml_id_syntax() {
        assert!(is_valid_xml_id("meta_1"));
        assert!(is_valid_xml_id("_m.1-x"));
        assert!(is_valid_xml_id("m\u{e9}ta"));
        assert!(!is_valid_xml_id("1meta"));
        assert!(!is_valid_xml_id("-meta"));
        assert!(!is_valid_xml_id(""));
    }
}
