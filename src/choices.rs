//! The service ships choices as one string delimited by `", "`.
//!
//! Pure functions, no allocation beyond the output.

/// Delimiter between choices on the wire.
pub const CHOICE_DELIMITER: &str = ", ";

/// Split a delimited choices string into its entries, preserving order.
///
/// An empty string yields no choices. Entries are not trimmed, so
/// `join_choices(&split_choices(s)) == s` for every `s`.
pub fn split_choices(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(CHOICE_DELIMITER).map(str::to_string).collect()
}

/// Rejoin choices into the wire form.
pub fn join_choices(choices: &[String]) -> String {
    choices.join(CHOICE_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_comma_space() {
        assert_eq!(split_choices("cat, dog, elephant"), vec!["cat", "dog", "elephant"]);
    }

    #[test]
    fn single_choice_has_one_entry() {
        assert_eq!(split_choices("elephant"), vec!["elephant"]);
    }

    #[test]
    fn empty_string_has_no_choices() {
        assert!(split_choices("").is_empty());
        assert_eq!(join_choices(&[]), "");
    }

    #[test]
    fn bare_comma_is_not_a_delimiter() {
        // "1,000" is one choice
        assert_eq!(split_choices("1,000, 2,000"), vec!["1,000", "2,000"]);
    }

    #[test]
    fn split_then_join_reproduces_input() {
        for raw in [
            "cat, dog, elephant",
            "a",
            "",
            "x, , y",
            " leading, trailing ",
            "1,000, 2,000",
        ] {
            assert_eq!(join_choices(&split_choices(raw)), raw, "round-trip of {:?}", raw);
        }
    }
}
