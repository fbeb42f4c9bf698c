//! Parsing of the XML schema simple types used in attribute values.
use std::borrow::Cow;

/// `ST_DecimalNumber` restricted to non-negative values (ids, levels, starts).
///
/// Malformed values are logged and treated as absent.
pub fn parse_decimal(raw: &str) -> Option<u32> {
    match atoi_simd::parse::<u32, false, false>(raw.trim().as_bytes()) {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring malformed decimal number {raw:?}");
            None
        },
    }
}

/// `ST_DecimalNumber` including negative values (note ids).
pub fn parse_signed_decimal(raw: &str) -> Option<i32> {
    match atoi_simd::parse::<i32, false, false>(raw.trim().as_bytes()) {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring malformed decimal number {raw:?}");
            None
        },
    }
}

/// `ST_SignedTwipsMeasure`: a signed integer count of twips.
pub fn parse_twips(raw: &str) -> Option<i32> {
    match atoi_simd::parse::<i32, false, false>(raw.trim().as_bytes()) {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring malformed twips measure {raw:?}");
            None
        },
    }
}

/// `ST_OnOff`. An element without `w:val` is on.
pub fn parse_on_off(raw: Option<Cow<'_, str>>) -> bool {
    match raw.as_deref() {
        None => true,
        Some("true" | "1" | "on") => true,
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("12"), Some(12));
        assert_eq!(parse_decimal(" 3 "), Some(3));
        assert_eq!(parse_decimal("-1"), None);
        assert_eq!(parse_decimal("x"), None);
        assert_eq!(parse_signed_decimal("-1"), Some(-1));
        assert_eq!(parse_signed_decimal("1.5"), None);
    }

    #[test]
    fn test_parse_twips_and_on_off() {
        assert_eq!(parse_twips("-360"), Some(-360));
        assert!(parse_on_off(None));
        assert!(parse_on_off(Some(Cow::Borrowed("1"))));
        assert!(!parse_on_off(Some(Cow::Borrowed("false"))));
    }
}
