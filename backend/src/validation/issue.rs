//! Body rules for the issue endpoints.

use super::{
    descriptor::{FieldRule, RuleSet},
    rules::OBJECT_ID_RE,
};

const USER_ID_LENGTH_MSG: &str = "User ID must be exactly 24 characters long";
const USER_ID_HEX_MSG: &str = "User ID must be a valid 24-digit hexadecimal string";
const NGO_ID_MSG: &str = "NGO ID must be between 1 and 50 characters if provided";
const STATUS_MSG: &str = "Status must be an integer between 0 and 10";
const COMMENTS_MSG: &str = "Comments must be less than 4000 characters if provided";

fn optional_user_id() -> FieldRule {
    FieldRule::body("userId")
        .optional()
        .not_empty()
        .length(24, 24)
        .with_message(USER_ID_LENGTH_MSG)
        .matches(&OBJECT_ID_RE)
        .with_message(USER_ID_HEX_MSG)
        .trim()
        .escape()
}

fn ngo_id() -> FieldRule {
    FieldRule::body("ngoId")
        .optional()
        .length(1, 50)
        .trim()
        .escape()
        .with_message(NGO_ID_MSG)
}

fn status() -> FieldRule {
    FieldRule::body("status")
        .optional()
        .int(0, 10)
        .with_message(STATUS_MSG)
}

fn comments() -> FieldRule {
    FieldRule::body("comments")
        .optional()
        .length(0, 4000)
        .trim()
        .escape()
        .with_message(COMMENTS_MSG)
}

fn flag(field: &'static str, message: &'static str) -> FieldRule {
    FieldRule::body(field)
        .optional()
        .boolean()
        .with_message(message)
}

pub fn create_issue_validation_rules() -> RuleSet {
    RuleSet::new(vec![
        optional_user_id(),
        ngo_id(),
        FieldRule::body("issueTitle")
            .not_empty()
            .length(1, 200)
            .trim()
            .escape()
            .message("Issue is required and must be between 1 and 200 characters"),
        FieldRule::body("issueDetails")
            .not_empty()
            .length(1, 4000)
            .trim()
            .escape()
            .message("Issue details are required and must be between 1 and 4000 characters"),
        status(),
        comments(),
        flag("is_active", "is_active must be a boolean value"),
        flag("is_deleted", "is_deleted must be a boolean value"),
    ])
}

pub fn update_issue_validation_rules() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::body("issueNo")
            .not_empty()
            .length(1, 50)
            .trim()
            .escape()
            .message("Issue number must be between 1 and 50 characters"),
        optional_user_id(),
        ngo_id(),
        FieldRule::body("issue")
            .optional()
            .not_empty()
            .length(1, 200)
            .trim()
            .escape()
            .message("Issue must be between 1 and 200 characters"),
        FieldRule::body("issueDetails")
            .optional()
            .not_empty()
            .length(1, 4000)
            .trim()
            .escape()
            .message("Issue details must be between 1 and 4000 characters"),
        status(),
        comments(),
        flag("is_active", "is_active must be a boolean value"),
        flag("is_deleted", "is_deleted must be a boolean value"),
    ])
}

pub fn delete_issue_validations() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::body("issueNo")
            .length(23, 23)
            .with_message("Issue number must be exactly 23 digits long")
            .numeric()
            .with_message("Issue number must contain only numeric characters"),
        FieldRule::body("userId")
            .length(24, 24)
            .with_message(USER_ID_LENGTH_MSG)
            .matches(&OBJECT_ID_RE)
            .with_message(USER_ID_HEX_MSG),
    ])
}

pub fn check_user_id_validation() -> RuleSet {
    RuleSet::new(vec![FieldRule::body("userId")
        .not_empty()
        .with_message("Please provide a valid ID")
        .length(24, 24)
        .with_message("ID must be a 24-character hex string")
        .hexadecimal()
        .with_message("ID must be a valid hexadecimal string")
        .trim()
        .escape()])
}
