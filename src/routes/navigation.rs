use axum::{extract::{Query, State}, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use serde_json::json;

use crate::middleware::auth::BearerToken;
use crate::models::user::UserRecord;
use crate::services::navigation_service::{NavRole, NavigationService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NavigationQuery {
    #[serde(default)]
    pub role: NavRole,
    #[serde(default = "default_show_submissions")]
    pub show_submissions: bool,
    pub name: Option<String>,
    pub email: Option<String>,
}

fn default_show_submissions() -> bool {
    true
}

pub async fn get_navigation(Query(query): Query<NavigationQuery>) -> impl IntoResponse {
    let user = (query.name.is_some() || query.email.is_some()).then(|| UserRecord {
        name: query.name.clone(),
        email: query.email.clone(),
        ..UserRecord::default()
    });
    Json(NavigationService::navbar(query.role, user.as_ref(), query.show_submissions))
}

/// Ends the platform session; always succeeds from the caller's point of view.
pub async fn logout(
    State(state): State<AppState>,
    Extension(token): Extension<BearerToken>,
) -> impl IntoResponse {
    state.platform.logout(token.as_str()).await;
    Json(json!({ "redirect": "/" }))
}
