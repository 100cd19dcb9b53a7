use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::auth::BearerToken;
use crate::services::submission_service::{QuestionFilter, QuestionOption, StudentRow, SubmissionService};
use crate::{error::Result, AppState};

pub const USER_EMAIL_HEADER: &str = "x-user-email";

#[derive(Debug, Deserialize)]
pub struct SubmissionsQuery {
    pub question_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StudentSubmissionsResponse {
    pub has_user_submission: bool,
    pub question_options: Vec<QuestionOption>,
    pub rows: Vec<StudentRow>,
}

/// Submissions a student may see for a test. Rows stay hidden until the
/// caller has submitted at least once.
pub async fn list_student_submissions(
    State(state): State<AppState>,
    Path(test_id): Path<String>,
    Query(query): Query<SubmissionsQuery>,
    Extension(token): Extension<BearerToken>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let email = headers
        .get(USER_EMAIL_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim);

    let (test, records) = tokio::join!(
        state.platform.get_test(&test_id, token.as_str()),
        state.platform.submissions_by_test_user(&test_id, token.as_str()),
    );
    let records = records?;
    let test = test
        .map_err(|e| tracing::warn!(test_id = %test_id, error = %e, "Test metadata unavailable"))
        .ok();

    let has_user_submission = SubmissionService::has_user_submission(&records, email);
    let filter = QuestionFilter::from_param(query.question_id.as_deref());
    let rows = if has_user_submission {
        SubmissionService::student_rows(&records, test.as_ref(), &filter, state.report_options.utc_offset)
    } else {
        Vec::new()
    };

    Ok(Json(StudentSubmissionsResponse {
        has_user_submission,
        question_options: SubmissionService::question_options(test.as_ref()),
        rows,
    }))
}
