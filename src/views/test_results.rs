use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::submission::SubmissionRecord;
use crate::services::{
    export_service::{default_filename, ReportFile, ReportFormat},
    platform_service::PlatformService,
    report_service::{ReportOptions, ReportRow, ReportService},
    submission_service::SubmissionService,
};
use crate::views::state::{ExpandedRows, ViewState};

/// Admin page listing every submission of one test, with per-row code
/// expansion and CSV download.
#[derive(Debug, Clone)]
pub struct TestResultsView {
    test_id: Option<String>,
    options: ReportOptions,
    pub submissions: ViewState<Vec<SubmissionRecord>>,
    pub expanded: ExpandedRows,
}

impl TestResultsView {
    pub fn new(test_id: Option<String>, options: ReportOptions) -> Self {
        Self {
            test_id: test_id.filter(|id| !id.trim().is_empty()),
            options,
            submissions: ViewState::Idle,
            expanded: ExpandedRows::default(),
        }
    }

    pub fn test_id(&self) -> Option<&str> {
        self.test_id.as_deref()
    }

    /// Moves to `Loading`, or straight to `Failed` when the request cannot be
    /// made. Returns the test id to fetch.
    pub fn begin_load(&mut self, token: Option<&str>) -> Option<String> {
        match (token.filter(|t| !t.is_empty()), self.test_id.clone()) {
            (Some(_), Some(test_id)) => {
                self.submissions = ViewState::Loading;
                Some(test_id)
            }
            _ => {
                self.submissions = ViewState::Failed("Missing token or test ID".to_string());
                None
            }
        }
    }

    pub fn finish_load(&mut self, result: Result<Vec<SubmissionRecord>>) {
        self.expanded.clear();
        self.submissions = ViewState::from_result(result, "Failed to fetch submissions");
    }

    pub async fn load(&mut self, platform: &PlatformService, token: Option<&str>) {
        let Some(test_id) = self.begin_load(token) else {
            return;
        };
        let token = token.unwrap_or_default();
        let result = platform.submissions_by_test(&test_id, token).await;
        self.finish_load(result);
    }

    pub fn toggle_row(&mut self, index: usize) -> bool {
        self.expanded.toggle(index)
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.is_expanded(index)
    }

    fn records(&self) -> &[SubmissionRecord] {
        self.submissions.data().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn test_start_time(&self) -> Option<DateTime<Utc>> {
        SubmissionService::embedded_test_context(self.records())
            .and_then(|t| t.start_time(self.options.utc_offset))
    }

    pub fn rows(&self) -> Vec<ReportRow> {
        let records = self.records();
        ReportService::rows(records, SubmissionService::embedded_test_context(records), &self.options)
    }

    /// CSV of whatever is currently loaded, named after the test.
    pub fn export(&self) -> ReportFile {
        let records = self.records();
        let content = ReportService::build_csv(
            records,
            SubmissionService::embedded_test_context(records),
            &self.options,
        );
        let test_id = self.test_id.as_deref().unwrap_or("unknown");
        ReportFile::csv(content, default_filename(test_id, ReportFormat::Csv))
    }
}
