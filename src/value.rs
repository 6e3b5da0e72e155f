//! Scalar validators turning string values into typed fields.

use crate::error::ParseError;
use crate::tokenize::{ArgMap, LIST_DELIMITER};

/// Parses a non-negative sector count.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumericValue`] when `value` is not a
/// non-negative integer.
pub fn parse_unsigned_sectors(field: &str, value: &str) -> Result<u64, ParseError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ParseError::invalid(field, value))
}

/// Parses an integer-like boolean: `0` is false, any other integer is true.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumericValue`] when `value` is not an integer.
pub fn parse_bool(field: &str, value: &str) -> Result<bool, ParseError> {
    value
        .trim()
        .parse::<i64>()
        .map(|parsed| parsed != 0)
        .map_err(|_| ParseError::invalid(field, value))
}

/// Splits a comma-separated list.
///
/// Items are not filtered: an empty input yields a single empty item, which
/// callers reject with [`require_paths`].
#[must_use]
pub fn parse_csv_list(value: &str) -> Vec<String> {
    value
        .split(LIST_DELIMITER)
        .map(|item| item.trim().to_owned())
        .collect()
}

/// Returns the value of a required field.
///
/// # Errors
///
/// Returns [`ParseError::MissingArgument`] when the field is absent.
pub fn require<'a>(args: &'a ArgMap, field: &str) -> Result<&'a str, ParseError> {
    args.get(field)
        .map(String::as_str)
        .ok_or_else(|| ParseError::missing(field))
}

/// Returns the value of a required field that must not be blank.
///
/// # Errors
///
/// Returns [`ParseError::MissingArgument`] when the field is absent or empty.
pub fn require_non_empty<'a>(args: &'a ArgMap, field: &str) -> Result<&'a str, ParseError> {
    let value = require(args, field)?;
    if value.is_empty() {
        return Err(ParseError::missing(field));
    }
    Ok(value)
}

/// Parses a required sector count that must be greater than zero.
///
/// # Errors
///
/// Returns [`ParseError::MissingArgument`] when absent and
/// [`ParseError::InvalidNumericValue`] when unparsable or zero.
pub fn require_positive_sectors(args: &ArgMap, field: &str) -> Result<u64, ParseError> {
    let raw = require(args, field)?;
    match parse_unsigned_sectors(field, raw)? {
        0 => Err(ParseError::invalid(field, raw)),
        sectors => Ok(sectors),
    }
}

/// Parses an optional sector count, falling back to `default`.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumericValue`] when present but unparsable.
pub fn optional_sectors(args: &ArgMap, field: &str, default: u64) -> Result<u64, ParseError> {
    args.get(field)
        .map_or(Ok(default), |raw| parse_unsigned_sectors(field, raw))
}

/// Parses an optional integer-like boolean, falling back to `default`.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumericValue`] when present but unparsable.
pub fn optional_bool(args: &ArgMap, field: &str, default: bool) -> Result<bool, ParseError> {
    args.get(field)
        .map_or(Ok(default), |raw| parse_bool(field, raw))
}

/// Parses a required path list in which every item must be non-empty.
///
/// # Errors
///
/// Returns [`ParseError::MissingArgument`] when the field is absent or any of
/// its items is empty.
pub fn require_paths(args: &ArgMap, field: &str) -> Result<Vec<String>, ParseError> {
    let paths = parse_csv_list(require(args, field)?);
    if paths.iter().any(String::is_empty) {
        return Err(ParseError::missing(field));
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::{ARG_DELIMITER, tokenize};
    use rstest::rstest;

    #[rstest]
    #[case("0", 0)]
    #[case("8", 8)]
    #[case(" 100 ", 100)]
    #[case("18446744073709551615", u64::MAX)]
    fn accepts_non_negative_integers(#[case] raw: &str, #[case] expected: u64) {
        assert_eq!(parse_unsigned_sectors("capacity_sectors", raw), Ok(expected));
    }

    #[rstest]
    #[case("abc")]
    #[case("-1")]
    #[case("")]
    #[case("1.5")]
    #[case("18446744073709551616")]
    fn rejects_invalid_sector_counts(#[case] raw: &str) {
        assert_eq!(
            parse_unsigned_sectors("capacity_sectors", raw),
            Err(ParseError::InvalidNumericValue {
                field: String::from("capacity_sectors"),
                value: raw.to_owned(),
            })
        );
    }

    #[rstest]
    #[case("0", false)]
    #[case("1", true)]
    #[case("2", true)]
    #[case("-1", true)]
    fn parses_integer_booleans(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(parse_bool("read_only", raw), Ok(expected));
    }

    #[rstest]
    #[case("true")]
    #[case("yes")]
    #[case("")]
    fn rejects_non_integer_booleans(#[case] raw: &str) {
        assert!(matches!(
            parse_bool("read_only", raw),
            Err(ParseError::InvalidNumericValue { .. })
        ));
    }

    #[test]
    fn empty_list_yields_single_empty_item() {
        assert_eq!(parse_csv_list(""), vec![String::new()]);
    }

    #[test]
    fn list_preserves_order() {
        assert_eq!(
            parse_csv_list("/dev/b,/dev/a"),
            vec![String::from("/dev/b"), String::from("/dev/a")]
        );
    }

    #[rstest]
    #[case::empty("paths=")]
    #[case::hole("paths=/a,,/b")]
    #[case::trailing("paths=/a,")]
    #[case::absent("other=1")]
    fn require_paths_rejects_missing_items(#[case] raw: &str) {
        let args = tokenize(raw, ARG_DELIMITER);

        assert_eq!(
            require_paths(&args, "paths"),
            Err(ParseError::MissingArgument(String::from("paths")))
        );
    }

    #[rstest]
    #[case("strip_len_sectors=0")]
    #[case("strip_len_sectors=x")]
    fn require_positive_sectors_rejects_zero_and_garbage(#[case] raw: &str) {
        let args = tokenize(raw, ARG_DELIMITER);

        assert!(matches!(
            require_positive_sectors(&args, "strip_len_sectors"),
            Err(ParseError::InvalidNumericValue { .. })
        ));
    }

    #[test]
    fn optional_values_fall_back_to_defaults() {
        let args = ArgMap::new();

        assert_eq!(optional_sectors(&args, "cache_len_sectors", 0), Ok(0));
        assert_eq!(optional_bool(&args, "read_only", false), Ok(false));
    }
}
