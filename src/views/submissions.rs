use chrono::FixedOffset;

use crate::error::Result;
use crate::models::{submission::SubmissionRecord, test::TestContext};
use crate::services::{
    platform_service::PlatformService,
    submission_service::{QuestionFilter, QuestionOption, StudentRow, SubmissionService},
};
use crate::utils::time::utc_offset;
use crate::views::state::ViewState;

/// Student-facing list of submissions for one test.
#[derive(Debug, Clone)]
pub struct SubmissionsView {
    test_id: String,
    user_email: Option<String>,
    pub test: Option<TestContext>,
    pub submissions: ViewState<Vec<SubmissionRecord>>,
    pub filter: QuestionFilter,
    pub utc_offset: FixedOffset,
}

impl SubmissionsView {
    pub fn new(test_id: impl Into<String>, user_email: Option<String>) -> Self {
        Self {
            test_id: test_id.into(),
            user_email,
            test: None,
            submissions: ViewState::Idle,
            filter: QuestionFilter::All,
            utc_offset: utc_offset(0),
        }
    }

    /// A failed test fetch only drops the test metadata.
    pub fn finish_test_load(&mut self, result: Result<TestContext>) {
        self.test = result.ok();
    }

    pub fn finish_submissions_load(&mut self, result: Result<Vec<SubmissionRecord>>) {
        self.submissions = match result {
            Ok(records) => ViewState::Loaded(records),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch submissions");
                ViewState::Failed("Failed to fetch submissions".to_string())
            }
        };
    }

    /// Fetches the test and the submissions; also used by the refresh action.
    pub async fn refresh(&mut self, platform: &PlatformService, token: &str) {
        self.submissions = ViewState::Loading;
        let (test, submissions) = tokio::join!(
            platform.get_test(&self.test_id, token),
            platform.submissions_by_test_user(&self.test_id, token),
        );
        self.finish_test_load(test);
        self.finish_submissions_load(submissions);
    }

    fn records(&self) -> &[SubmissionRecord] {
        self.submissions.data().map(Vec::as_slice).unwrap_or_default()
    }

    /// The table is only shown once the student has submitted something.
    pub fn can_view(&self) -> bool {
        SubmissionService::has_user_submission(self.records(), self.user_email.as_deref())
    }

    pub fn question_options(&self) -> Vec<QuestionOption> {
        SubmissionService::question_options(self.test.as_ref())
    }

    pub fn rows(&self) -> Vec<StudentRow> {
        SubmissionService::student_rows(self.records(), self.test.as_ref(), &self.filter, self.utc_offset)
    }
}
