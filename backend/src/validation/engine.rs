//! Applies a [`RuleSet`] to a request body.
//!
//! Every field is checked independently so one request reports all of its
//! broken fields at once. Sanitizers never touch the caller's payload: the
//! trimmed and escaped values land in [`Validated::sanitized`], a copy.

use serde_json::{Map, Number, Value};
use std::borrow::Cow;

use super::{
    descriptor::{Check, FailurePolicy, FieldRule, RuleSet},
    errors::{ErrorKind, FieldErrors},
};

/// Outcome of running a rule set over one payload.
#[derive(Debug, Clone, Default)]
pub struct Validated {
    pub errors: FieldErrors,
    pub sanitized: Map<String, Value>,
}

impl Validated {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl RuleSet {
    pub fn evaluate(&self, payload: &Map<String, Value>) -> Validated {
        evaluate(self, payload)
    }
}

pub fn evaluate(rules: &RuleSet, payload: &Map<String, Value>) -> Validated {
    let mut errors = FieldErrors::new();
    let mut sanitized = payload.clone();

    for rule in rules.rules() {
        let field = rule.field();
        let Some(value) = payload.get(field) else {
            if rule.is_required() {
                errors.push(field, rule.leading_message(), ErrorKind::MissingRequiredField);
            }
            continue;
        };

        let Some(text) = coerce(value) else {
            errors.push(field, rule.leading_message(), ErrorKind::TypeMismatch);
            continue;
        };

        let cleaned = run_checks(rule, text.into_owned(), rules.policy(), &mut errors);
        if rule.has_sanitizers() {
            sanitized.insert(field.to_string(), Value::String(cleaned));
        }
    }

    if !errors.is_empty() {
        tracing::debug!(
            error_count = errors.len(),
            policy = %rules.policy(),
            "payload failed validation"
        );
    }

    Validated { errors, sanitized }
}

/// String form of a scalar body value. Arrays and objects have none.
fn coerce(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(number_text(n))),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null => Some(Cow::Borrowed("")),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Integral floats print without a fraction, so `5.0` reads as `5`.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f)
            if n.is_f64() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
        {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

fn run_checks(
    rule: &FieldRule,
    mut current: String,
    policy: FailurePolicy,
    errors: &mut FieldErrors,
) -> String {
    for check in rule.checks() {
        match check {
            Check::Sanitize(sanitizer) => current = sanitizer.apply(&current),
            Check::Validate {
                constraint,
                message,
            } => {
                if let Err(err) = constraint.check(&current) {
                    tracing::trace!(field = rule.field(), code = %err.code, "field check failed");
                    errors.push(
                        rule.field(),
                        rule.resolve_message(message.as_ref()),
                        constraint.kind(),
                    );
                    if policy == FailurePolicy::FirstPerField {
                        break;
                    }
                }
            }
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object payload")
    }

    fn title_rules() -> RuleSet {
        RuleSet::new(vec![
            FieldRule::body("title")
                .not_empty()
                .length(1, 5)
                .trim()
                .escape()
                .message("title message"),
            FieldRule::body("count").optional().int(0, 3).with_message("count message"),
        ])
    }

    #[test]
    fn valid_payload_is_sanitized_on_a_copy() {
        let input = payload(json!({ "title": " <a> ", "extra": 1 }));
        let validated = title_rules().evaluate(&input);

        assert!(validated.is_valid());
        assert_eq!(validated.sanitized["title"], "&lt;a&gt;");
        assert_eq!(validated.sanitized["extra"], 1);
        assert_eq!(input["title"], " <a> ");
    }

    #[test]
    fn missing_required_field_is_reported_once() {
        let validated = title_rules().evaluate(&Map::new());

        let errors = validated.errors.into_vec();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
        assert_eq!(errors[0].kind, ErrorKind::MissingRequiredField);
        assert_eq!(errors[0].message, "title message");
    }

    #[test]
    fn length_runs_before_trim() {
        let validated = title_rules().evaluate(&payload(json!({ "title": " abcde " })));

        let errors = validated.errors.into_vec();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::LengthOutOfBounds);
    }

    #[test]
    fn numbers_and_booleans_are_coerced_to_strings() {
        let validated = title_rules().evaluate(&payload(json!({ "title": 12, "count": 3 })));
        assert!(validated.is_valid());
        assert_eq!(validated.sanitized["title"], "12");
        assert_eq!(validated.sanitized["count"], 3);

        let validated = title_rules().evaluate(&payload(json!({ "title": true, "count": true })));
        let errors = validated.errors.into_vec();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "count");
        assert_eq!(errors[0].message, "count message");
    }

    #[test]
    fn null_counts_as_present_and_empty() {
        let validated = title_rules().evaluate(&payload(json!({ "title": null })));

        let errors = validated.errors.into_vec();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::LengthOutOfBounds);
    }

    #[test]
    fn structured_values_are_type_mismatches() {
        let validated =
            title_rules().evaluate(&payload(json!({ "title": ["a"], "count": { "n": 1 } })));

        let kinds: Vec<_> = validated.errors.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ErrorKind::TypeMismatch, ErrorKind::TypeMismatch]);
    }

    #[test]
    fn all_per_field_policy_reports_every_failing_check() {
        let rules = title_rules().with_policy(FailurePolicy::AllPerField);
        let validated = rules.evaluate(&payload(json!({ "title": "" })));

        assert_eq!(validated.errors.len(), 2);
        assert!(validated
            .errors
            .iter()
            .all(|e| e.kind == ErrorKind::LengthOutOfBounds));
    }

    #[test]
    fn integral_floats_coerce_like_integers() {
        let rules = RuleSet::new(vec![
            FieldRule::body("count").int(0, 3),
            FieldRule::body("flag").boolean(),
            FieldRule::body("ratio").optional().length(3, 3),
        ]);
        let validated =
            rules.evaluate(&payload(json!({ "count": 3.0, "flag": 1.0, "ratio": 2.5 })));

        assert!(validated.is_valid(), "{:?}", validated.errors);
        assert_eq!(validated.sanitized["count"], 3.0);
    }
}
