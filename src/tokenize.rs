//! Splits raw argument strings into `key=value` pairs.

use std::collections::BTreeMap;

/// Ordered key/value mapping produced by [`tokenize`].
pub type ArgMap = BTreeMap<String, String>;

/// Delimiter separating top-level command arguments.
pub const ARG_DELIMITER: char = ' ';

/// Delimiter separating legs within a composite leg list.
pub const GROUP_DELIMITER: char = ':';

/// Delimiter separating fields inside a single leg.
pub const FIELD_DELIMITER: char = ';';

/// Delimiter separating entries of a path list.
pub const LIST_DELIMITER: char = ',';

/// Splits `raw` on `delimiter` into a key/value mapping.
///
/// Segments without an `=` are dropped. Each kept segment is split on its
/// first `=`, and both halves are trimmed. A repeated key keeps the value of
/// its last occurrence.
#[must_use]
pub fn tokenize(raw: &str, delimiter: char) -> ArgMap {
    raw.split(delimiter)
        .filter_map(|segment| segment.split_once('='))
        .map(|(key, value)| (key.trim().to_owned(), value.trim().to_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn splits_space_separated_pairs() {
        let args = tokenize("a=1 b=2", ARG_DELIMITER);

        assert_eq!(args.len(), 2);
        assert_eq!(args.get("a").map(String::as_str), Some("1"));
        assert_eq!(args.get("b").map(String::as_str), Some("2"));
    }

    #[rstest]
    #[case::bare_word("name=t1 verbose", 1)]
    #[case::empty("", 0)]
    #[case::only_spaces("   ", 0)]
    #[case::no_pairs("alpha beta", 0)]
    fn drops_segments_without_equals(#[case] raw: &str, #[case] expected: usize) {
        assert_eq!(tokenize(raw, ARG_DELIMITER).len(), expected);
    }

    #[test]
    fn last_duplicate_wins() {
        let args = tokenize("name=first name=second", ARG_DELIMITER);

        assert_eq!(args.get("name").map(String::as_str), Some("second"));
    }

    #[test]
    fn splits_on_first_equals_only() {
        let args = tokenize("raid1s=paths=/a,/b", ARG_DELIMITER);

        assert_eq!(args.get("raid1s").map(String::as_str), Some("paths=/a,/b"));
    }

    #[test]
    fn trims_keys_and_values() {
        let args = tokenize(" paths = /a,/b ; strip_len_sectors= 8", FIELD_DELIMITER);

        assert_eq!(args.get("paths").map(String::as_str), Some("/a,/b"));
        assert_eq!(args.get("strip_len_sectors").map(String::as_str), Some("8"));
    }

    #[test]
    fn keeps_empty_values() {
        let args = tokenize("paths=", ARG_DELIMITER);

        assert_eq!(args.get("paths").map(String::as_str), Some(""));
    }
}
