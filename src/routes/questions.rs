use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use crate::middleware::auth::BearerToken;
use crate::{error::Result, AppState};

pub async fn list_questions(
    State(state): State<AppState>,
    Extension(token): Extension<BearerToken>,
) -> Result<impl IntoResponse> {
    let questions = state.platform.list_questions(token.as_str()).await?;
    Ok(Json(questions))
}

pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(token): Extension<BearerToken>,
) -> Result<impl IntoResponse> {
    state.platform.delete_question(&id, token.as_str()).await?;
    tracing::info!(question_id = %id, "Question deleted");
    Ok(StatusCode::NO_CONTENT)
}
