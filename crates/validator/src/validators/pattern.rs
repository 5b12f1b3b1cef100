//! Regular expression validator

use regex::Regex;

use crate::foundation::{ValidationError, ValueRule};
use crate::member::{Value, ValueType};

crate::validator! {
    /// Validates that the whole value matches a regular expression.
    ///
    /// The pattern is anchored at both ends, so `\d+` rejects `"12a"`. Null
    /// and blank text pass; pair with [`Required`](super::Required) to demand
    /// a value. Non-text values are matched against their display form.
    pub MatchesRegex { regex: Regex, pattern: String } for Value;
    rule(self, input) {
        input.is_blank()
            || match input.as_str() {
                Some(text) => self.regex.is_match(text),
                None => self.regex.is_match(&input.to_string()),
            }
    }
    error(self, input) {
        ValidationError::invalid_format(self.pattern.clone()).with_param("actual", input.to_string())
    }
    new(pattern: &str) -> regex::Error {
        Ok(Self {
            regex: Regex::new(&format!("^(?:{pattern})$"))?,
            pattern: pattern.to_owned(),
        })
    }
    fn matches_regex(pattern: &str) -> regex::Error;
}

impl ValueRule for MatchesRegex {
    fn accepts(&self, value_type: ValueType) -> bool {
        value_type.is_ordered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Validate;
    use rstest::rstest;

    #[rstest]
    #[case("123", true)]
    #[case("12a", false)]
    #[case("a12", false)]
    #[case("", true)]
    #[case("   ", true)]
    fn test_digits(#[case] input: &str, #[case] valid: bool) {
        let rule = matches_regex(r"^\d+$").unwrap();
        assert_eq!(rule.validate(&Value::from(input)).is_ok(), valid);
    }

    #[test]
    fn test_pattern_matches_whole_value() {
        let rule = matches_regex(r"\d+").unwrap();
        assert!(rule.validate(&Value::from("42")).is_ok());
        assert!(rule.validate(&Value::from("x42")).is_err());
    }

    #[test]
    fn test_null_passes() {
        assert!(matches_regex("[a-z]+").unwrap().validate(&Value::Null).is_ok());
    }

    #[test]
    fn test_numbers_use_display_form() {
        let rule = matches_regex(r"\d{3}").unwrap();
        assert!(rule.validate(&Value::UInt(123)).is_ok());
        assert!(rule.validate(&Value::UInt(1234)).is_err());
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches_regex("(unclosed").is_err());
    }

    #[test]
    fn test_error_reports_pattern() {
        let error = matches_regex(r"^\d+$")
            .unwrap()
            .validate(&Value::from("12a"))
            .unwrap_err();
        assert_eq!(error.code, "invalid_format");
        assert_eq!(error.param("expected"), Some(r"^\d+$"));
    }
}
