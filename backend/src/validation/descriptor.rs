//! Declarative field descriptors and the rule sets built from them.

use regex::Regex;
use std::{borrow::Cow, fmt, str::FromStr};
use validator::ValidationError;

use super::{errors::ErrorKind, rules, sanitize};

/// How many failures a single field may contribute to the error list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failing check of a field.
    #[default]
    FirstPerField,
    /// Keep evaluating the field and report every failing check.
    AllPerField,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "first_per_field" => Ok(FailurePolicy::FirstPerField),
            "all" | "all_per_field" => Ok(FailurePolicy::AllPerField),
            other => Err(format!("unknown failure policy: {other}")),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::FirstPerField => f.write_str("first"),
            FailurePolicy::AllPerField => f.write_str("all"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Constraint {
    NotEmpty,
    Length { min: u64, max: u64 },
    Matches(&'static Regex),
    Int { min: i64, max: i64 },
    Boolean,
    Numeric,
    Hexadecimal,
}

impl Constraint {
    pub fn check(&self, value: &str) -> Result<(), ValidationError> {
        match self {
            Constraint::NotEmpty => rules::validate_not_empty(value),
            Constraint::Length { min, max } => rules::validate_length(value, *min, *max),
            Constraint::Matches(pattern) => rules::validate_matches(value, pattern),
            Constraint::Int { min, max } => rules::validate_int(value, *min, *max),
            Constraint::Boolean => rules::validate_boolean(value),
            Constraint::Numeric => rules::validate_numeric(value),
            Constraint::Hexadecimal => rules::validate_hexadecimal(value),
        }
    }

    /// An empty value is a length violation; a missing key is reported separately.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Constraint::NotEmpty | Constraint::Length { .. } => ErrorKind::LengthOutOfBounds,
            Constraint::Matches(_) | Constraint::Numeric | Constraint::Hexadecimal => {
                ErrorKind::PatternMismatch
            }
            Constraint::Int { .. } | Constraint::Boolean => ErrorKind::TypeMismatch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sanitizer {
    Trim,
    Escape,
}

impl Sanitizer {
    pub fn apply(self, value: &str) -> String {
        match self {
            Sanitizer::Trim => sanitize::trim(value),
            Sanitizer::Escape => sanitize::escape(value),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Check {
    Validate {
        constraint: Constraint,
        message: Option<Cow<'static, str>>,
    },
    Sanitize(Sanitizer),
}

/// Message used when neither the check nor the field names one.
pub const DEFAULT_MESSAGE: &str = "Invalid value";

/// Constraints for one body field, evaluated in declaration order.
#[derive(Debug, Clone)]
pub struct FieldRule {
    field: Cow<'static, str>,
    required: bool,
    checks: Vec<Check>,
    message: Option<Cow<'static, str>>,
}

impl FieldRule {
    /// Starts a required rule for the body key `field`.
    pub fn body(field: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field: field.into(),
            required: true,
            checks: Vec::new(),
            message: None,
        }
    }

    /// An absent key skips the whole rule. Present `null` or `""` is still checked.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn not_empty(self) -> Self {
        self.constraint(Constraint::NotEmpty)
    }

    pub fn length(self, min: u64, max: u64) -> Self {
        self.constraint(Constraint::Length { min, max })
    }

    pub fn matches(self, pattern: &'static Regex) -> Self {
        self.constraint(Constraint::Matches(pattern))
    }

    pub fn int(self, min: i64, max: i64) -> Self {
        self.constraint(Constraint::Int { min, max })
    }

    pub fn boolean(self) -> Self {
        self.constraint(Constraint::Boolean)
    }

    pub fn numeric(self) -> Self {
        self.constraint(Constraint::Numeric)
    }

    pub fn hexadecimal(self) -> Self {
        self.constraint(Constraint::Hexadecimal)
    }

    pub fn trim(mut self) -> Self {
        self.checks.push(Check::Sanitize(Sanitizer::Trim));
        self
    }

    pub fn escape(mut self) -> Self {
        self.checks.push(Check::Sanitize(Sanitizer::Escape));
        self
    }

    /// Sets the message of the most recently added constraint.
    pub fn with_message(mut self, text: impl Into<Cow<'static, str>>) -> Self {
        let text = text.into();
        let last = self.checks.iter_mut().rev().find_map(|check| match check {
            Check::Validate { message, .. } => Some(message),
            Check::Sanitize(_) => None,
        });
        match last {
            Some(slot) => *slot = Some(text),
            None => self.message = Some(text),
        }
        self
    }

    /// Sets the fallback message for constraints without their own.
    pub fn message(mut self, text: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(text.into());
        self
    }

    fn constraint(mut self, constraint: Constraint) -> Self {
        self.checks.push(Check::Validate {
            constraint,
            message: None,
        });
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    pub fn has_sanitizers(&self) -> bool {
        self.checks
            .iter()
            .any(|check| matches!(check, Check::Sanitize(_)))
    }

    /// Resolves the message reported when `own` is the failing check's message.
    pub fn resolve_message<'a>(&'a self, own: Option<&'a Cow<'static, str>>) -> &'a str {
        own.or(self.message.as_ref())
            .map(|m| &**m)
            .unwrap_or(DEFAULT_MESSAGE)
    }

    /// Message of the first constraint, used when the field cannot be checked at all.
    pub fn leading_message(&self) -> &str {
        let own = self.checks.iter().find_map(|check| match check {
            Check::Validate { message, .. } => Some(message.as_ref()),
            Check::Sanitize(_) => None,
        });
        self.resolve_message(own.flatten())
    }
}

/// Ordered field rules for one operation.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
    policy: FailurePolicy,
}

impl RuleSet {
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self {
            rules,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }
}
