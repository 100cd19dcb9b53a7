pub mod export;
pub mod health;
pub mod navigation;
pub mod questions;
pub mod submissions;
pub mod users;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::middleware::{auth::require_bearer_auth, rate_limit};
use crate::AppState;

/// Every dashboard route. `/health` and `/api/navigation` are open; the rest
/// need a bearer token to forward to the platform.
pub fn router(state: AppState, rps: u32) -> Router {
    let open_routes = Router::new()
        .route("/health", get(health::health))
        .route("/api/navigation", get(navigation::get_navigation));

    let dashboard_api = Router::new()
        .route("/api/tests/:test_id/results", get(export::get_test_results))
        .route("/api/tests/:test_id/results/export", get(export::export_test_results))
        .route("/api/tests/:test_id/submissions", get(submissions::list_student_submissions))
        .route("/api/questions", get(questions::list_questions))
        .route("/api/questions/:id", delete(questions::delete_question))
        .route("/api/admin/users", get(users::list_users))
        .route("/api/admin/users/:id/clear-status", delete(users::clear_user_status))
        .route("/api/logout", post(navigation::logout))
        .route_layer(axum::middleware::from_fn(require_bearer_auth))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RateLimiter::new(rps),
            rate_limit::rps_middleware,
        ));

    open_routes.merge(dashboard_api).with_state(state)
}
