use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::middleware::auth::BearerToken;
use crate::models::user::UserRecord;
use crate::services::user_service::{StatusFilter, UserService};
use crate::utils::validation::validate;
use crate::{error::Result, AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct UserListQuery {
    #[serde(default)]
    pub status: StatusFilter,
    #[validate(length(max = 200))]
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserRow {
    pub id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub roles: String,
    pub logged_in: bool,
    pub created_at: String,
    pub last_login: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserListResponse {
    pub total: usize,
    pub shown: usize,
    pub users: Vec<UserRow>,
}

fn to_row(user: &UserRecord, state: &AppState) -> UserRow {
    let offset = state.report_options.utc_offset;
    UserRow {
        id: user.identifier().map(|id| id.to_string()),
        name: user.display_name().to_string(),
        email: user.email.clone(),
        roles: user.display_roles(),
        logged_in: user.logged_in,
        created_at: user.display_created_at(offset),
        last_login: user.display_last_login(offset),
    }
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
    Extension(token): Extension<BearerToken>,
) -> Result<impl IntoResponse> {
    validate(&query)?;

    let users = state.platform.list_users(token.as_str()).await?;
    let filtered = UserService::filter_users(&users, query.status, query.search.as_deref().unwrap_or(""));

    Ok(Json(UserListResponse {
        total: users.len(),
        shown: filtered.len(),
        users: filtered.iter().map(|u| to_row(u, &state)).collect(),
    }))
}

/// Force a user's platform session to end
pub async fn clear_user_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(token): Extension<BearerToken>,
) -> Result<impl IntoResponse> {
    state.platform.clear_user_status(&id, token.as_str()).await?;
    tracing::info!(user_id = %id, "Cleared user login status");
    Ok(StatusCode::NO_CONTENT)
}
