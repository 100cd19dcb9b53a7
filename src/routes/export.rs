use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::auth::BearerToken;
use crate::models::{submission::SubmissionRecord, test::TestContext};
use crate::services::{
    export_service::{default_filename, ReportFile, ReportFormat},
    report_service::{ReportRow, ReportService},
    submission_service::SubmissionService,
};
use crate::utils::time::format_locale_datetime;
use crate::{error::Result, AppState};

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ReportFormat,
}

#[derive(Debug, Serialize)]
pub struct TestResultsResponse {
    pub test_id: String,
    pub test_start_time: Option<String>,
    pub count: usize,
    pub rows: Vec<ReportRow>,
}

/// Baseline for elapsed time: the test embedded in the first submission,
/// else the test itself, fetched only when some record lacks a duration.
async fn resolve_test_context(
    state: &AppState,
    records: &[SubmissionRecord],
    test_id: &str,
    token: &str,
) -> Option<TestContext> {
    if let Some(embedded) = SubmissionService::embedded_test_context(records) {
        return Some(embedded.clone());
    }
    if records.iter().all(|r| r.time_taken.is_some()) {
        return None;
    }
    match state.platform.get_test(test_id, token).await {
        Ok(test) => Some(test),
        Err(e) => {
            tracing::warn!(test_id, error = %e, "Test metadata unavailable; skipping elapsed-time fallback");
            None
        }
    }
}

/// Submission rows for the admin results table
pub async fn get_test_results(
    State(state): State<AppState>,
    Path(test_id): Path<String>,
    Extension(token): Extension<BearerToken>,
) -> Result<impl IntoResponse> {
    let records = state.platform.submissions_by_test(&test_id, token.as_str()).await?;
    let context = resolve_test_context(&state, &records, &test_id, token.as_str()).await;
    let rows = ReportService::rows(&records, context.as_ref(), &state.report_options);

    let test_start_time = context
        .as_ref()
        .and_then(|t| t.start_time(state.report_options.utc_offset))
        .map(|dt| format_locale_datetime(dt, state.report_options.utc_offset));

    Ok(Json(TestResultsResponse {
        test_id,
        test_start_time,
        count: rows.len(),
        rows,
    }))
}

/// Download the results of a test as CSV (default) or XLSX
pub async fn export_test_results(
    State(state): State<AppState>,
    Path(test_id): Path<String>,
    Query(query): Query<ExportQuery>,
    Extension(token): Extension<BearerToken>,
) -> Result<impl IntoResponse> {
    let records = state.platform.submissions_by_test(&test_id, token.as_str()).await?;
    let context = resolve_test_context(&state, &records, &test_id, token.as_str()).await;
    let filename = default_filename(&test_id, query.format);

    let file = match query.format {
        ReportFormat::Csv => {
            let content = ReportService::build_csv(&records, context.as_ref(), &state.report_options);
            ReportFile::csv(content, filename)
        }
        ReportFormat::Xlsx => {
            let buffer = ReportService::build_xlsx(&records, context.as_ref(), &state.report_options, &test_id)?;
            ReportFile::xlsx(buffer, filename)
        }
    };

    tracing::info!(
        test_id = %test_id,
        rows = records.len(),
        filename = %file.filename,
        "Generated test results export"
    );
    Ok(file)
}
