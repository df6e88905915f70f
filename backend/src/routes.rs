use axum::{
    handler::Handler,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::{
    config::Config,
    handlers::issues,
    middleware::{validate, RuleGuard},
    validation::{self, RuleSet},
};

/// Issue routes, each guarded by its own rule set.
pub fn router(config: &Config) -> Router {
    let guard = |rules: RuleSet| {
        from_fn_with_state(
            RuleGuard::new(rules.with_policy(config.failure_policy), config.max_body_bytes),
            validate,
        )
    };

    Router::new()
        .route("/api/health", get(issues::health))
        .route(
            "/api/issues",
            post(issues::create_issue.layer(guard(validation::create_issue_validation_rules())))
                .put(issues::update_issue.layer(guard(validation::update_issue_validation_rules())))
                .delete(issues::delete_issue.layer(guard(validation::delete_issue_validations()))),
        )
        .route(
            "/api/issues/user",
            post(issues::check_user_id.layer(guard(validation::check_user_id_validation()))),
        )
}
