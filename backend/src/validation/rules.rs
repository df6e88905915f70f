//! Leaf validation rules shared by every field descriptor.
//!
//! Each rule takes the string form of a body value and reports a
//! [`ValidationError`] whose code names the rule that failed.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use validator::{ValidateLength, ValidationError};

static INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-+]?(0|[1-9][0-9]*)$").unwrap());
static NUMERIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").unwrap());
static HEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(0x|0h)?[0-9a-fA-F]+$").unwrap());

/// 24 hexadecimal characters, the shape of a document id.
pub static OBJECT_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-fA-F0-9]{24}$").unwrap());

fn rule_error(code: &'static str) -> ValidationError {
    ValidationError::new(code)
}

/// Rejects the empty string. Whitespace counts as content.
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(rule_error("not_empty"));
    }
    Ok(())
}

fn is_variation_selector(c: char) -> bool {
    matches!(c, '\u{FE0E}' | '\u{FE0F}')
}

/// Validates the character count against inclusive bounds.
///
/// Text/emoji presentation selectors (U+FE0E, U+FE0F) are not counted.
pub fn validate_length(value: &str, min: u64, max: u64) -> Result<(), ValidationError> {
    let visible: String = value.chars().filter(|c| !is_variation_selector(*c)).collect();
    if !visible.validate_length(Some(min), Some(max), None) {
        let mut err = rule_error("length");
        err.add_param(Cow::from("min"), &min);
        err.add_param(Cow::from("max"), &max);
        err.add_param(Cow::from("actual"), &(visible.chars().count() as u64));
        return Err(err);
    }
    Ok(())
}

/// Validates that the value matches `pattern`.
pub fn validate_matches(value: &str, pattern: &Regex) -> Result<(), ValidationError> {
    if !pattern.is_match(value) {
        let mut err = rule_error("regex");
        err.add_param(Cow::from("pattern"), &pattern.as_str());
        return Err(err);
    }
    Ok(())
}

/// Validates a base-10 integer without leading zeros inside `min..=max`.
pub fn validate_int(value: &str, min: i64, max: i64) -> Result<(), ValidationError> {
    if !INT_RE.is_match(value) {
        return Err(rule_error("int"));
    }
    match value.parse::<i64>() {
        Ok(n) if (min..=max).contains(&n) => Ok(()),
        _ => {
            let mut err = rule_error("int_range");
            err.add_param(Cow::from("min"), &min);
            err.add_param(Cow::from("max"), &max);
            Err(err)
        }
    }
}

/// Accepts `true`, `false`, `1` and `0`.
pub fn validate_boolean(value: &str) -> Result<(), ValidationError> {
    match value {
        "true" | "false" | "1" | "0" => Ok(()),
        _ => Err(rule_error("boolean")),
    }
}

/// Accepts an optionally signed decimal number such as `42`, `-3` or `.5`.
pub fn validate_numeric(value: &str) -> Result<(), ValidationError> {
    if !NUMERIC_RE.is_match(value) {
        return Err(rule_error("numeric"));
    }
    Ok(())
}

/// Accepts hexadecimal digits with an optional `0x`/`0h` prefix.
pub fn validate_hexadecimal(value: &str) -> Result<(), ValidationError> {
    if !HEX_RE.is_match(value) {
        return Err(rule_error("hexadecimal"));
    }
    Ok(())
}
