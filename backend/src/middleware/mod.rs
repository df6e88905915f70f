pub mod validate;

pub use validate::{validate, validate_result, RuleGuard, ValidatedBody};
