//! Field normalisation shared by the request handlers.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::ValidationError;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Trims a field, treating absent and blank the same way.
pub fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// The text of a string field; any other JSON type counts as absent.
pub fn string_field(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Drops `null` and blank strings so they report as missing rather than malformed.
pub fn provided(value: Option<Value>) -> Option<Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    })
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Accepts an integer or an integer-valued string in 1..=5.
pub fn parse_rating(value: &Value) -> Result<i32, ValidationError> {
    let rating = as_integer(value).ok_or(ValidationError::InvalidRating)?;
    if (1..=5).contains(&rating) {
        i32::try_from(rating).map_err(|_| ValidationError::InvalidRating)
    } else {
        Err(ValidationError::InvalidRating)
    }
}

pub fn parse_user_id(value: &Value) -> Result<i64, ValidationError> {
    as_integer(value).ok_or(ValidationError::InvalidUserId)
}

pub fn parse_path_user_id(raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidUserId)
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A crop list must be a JSON array made only of strings.
pub fn parse_crops(value: &Value) -> Result<Vec<String>, ValidationError> {
    let items = value.as_array().ok_or(ValidationError::InvalidCrops)?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_owned)
                .ok_or(ValidationError::InvalidCrops)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Some("  Ramesh  "), Some("Ramesh"))]
    #[case(Some("   "), None)]
    #[case(None, None)]
    fn required_trims_and_drops_blanks(#[case] input: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(required(input.map(Into::into)).as_deref(), expected);
    }

    #[rstest]
    #[case(Some(json!("ragi")), Some("ragi"))]
    #[case(Some(json!(123)), None)]
    #[case(Some(json!(["ragi"])), None)]
    #[case(Some(Value::Null), None)]
    #[case(None, None)]
    fn only_strings_count_as_text(#[case] value: Option<Value>, #[case] expected: Option<&str>) {
        assert_eq!(string_field(value).as_deref(), expected);
    }

    #[rstest]
    #[case(Some(json!(3)), true)]
    #[case(Some(json!("abc")), true)]
    #[case(Some(json!("  ")), false)]
    #[case(Some(Value::Null), false)]
    #[case(None, false)]
    fn null_and_blank_are_not_provided(#[case] value: Option<Value>, #[case] kept: bool) {
        assert_eq!(provided(value).is_some(), kept);
    }

    #[rstest]
    #[case("farmer@test.com", true)]
    #[case("a@b.in", true)]
    #[case("farmer@test", false)]
    #[case("farmer test@x.com", false)]
    #[case("@test.com", false)]
    fn email_format(#[case] email: &str, #[case] valid: bool) {
        assert_eq!(is_valid_email(email), valid);
    }

    #[rstest]
    #[case(json!(1), Ok(1))]
    #[case(json!(5), Ok(5))]
    #[case(json!("4"), Ok(4))]
    #[case(json!(0), Err(ValidationError::InvalidRating))]
    #[case(json!(6), Err(ValidationError::InvalidRating))]
    #[case(json!(4.5), Err(ValidationError::InvalidRating))]
    #[case(json!("great"), Err(ValidationError::InvalidRating))]
    #[case(json!(true), Err(ValidationError::InvalidRating))]
    fn rating_range(#[case] value: Value, #[case] expected: Result<i32, ValidationError>) {
        assert_eq!(parse_rating(&value), expected);
    }

    #[test]
    fn user_id_accepts_numeric_strings() {
        assert_eq!(parse_user_id(&json!("42")), Ok(42));
        assert_eq!(parse_user_id(&json!("x")), Err(ValidationError::InvalidUserId));
        assert_eq!(parse_path_user_id("7"), Ok(7));
        assert_eq!(parse_path_user_id("abc"), Err(ValidationError::InvalidUserId));
    }

    #[test]
    fn crops_must_be_strings() {
        assert_eq!(
            parse_crops(&json!(["ರಾಗಿ (Ragi)", "ಹತ್ತಿ (Cotton)"])),
            Ok(vec!["ರಾಗಿ (Ragi)".to_owned(), "ಹತ್ತಿ (Cotton)".to_owned()])
        );
        assert_eq!(parse_crops(&json!("Ragi")), Err(ValidationError::InvalidCrops));
        assert_eq!(parse_crops(&json!(["Ragi", 3])), Err(ValidationError::InvalidCrops));
    }
}
