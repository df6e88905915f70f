//! Declarative validation of JSON request bodies.
//!
//! Rule sets are ordered lists of [`FieldRule`] descriptors. The engine
//! applies them to a body and returns the explicit per-request error
//! collector together with a sanitized copy of the payload; the
//! [`crate::middleware::validate`] middleware turns that into either a
//! forwarded request or a validation error response.

pub mod descriptor;
pub mod engine;
pub mod errors;
pub mod issue;
pub mod rules;
pub mod sanitize;

pub use descriptor::{Check, Constraint, FailurePolicy, FieldRule, RuleSet, Sanitizer};
pub use engine::{evaluate, Validated};
pub use errors::{ErrorKind, FieldError, FieldErrors};
pub use issue::{
    check_user_id_validation, create_issue_validation_rules, delete_issue_validations,
    update_issue_validation_rules,
};
