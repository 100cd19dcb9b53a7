use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::models::{submission::SubmissionRecord, test::TestContext};
use crate::utils::time::elapsed_time;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QuestionFilter {
    #[default]
    All,
    Question(String),
}

impl QuestionFilter {
    /// `None`, empty and `"all"` mean no filter.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some("all") => QuestionFilter::All,
            Some(id) => QuestionFilter::Question(id.to_string()),
        }
    }

    pub fn matches(&self, record: &SubmissionRecord) -> bool {
        match self {
            QuestionFilter::All => true,
            QuestionFilter::Question(id) => record.question_id.as_deref() == Some(id.as_str()),
        }
    }
}

/// Row of the student submissions table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRow {
    pub user_name: Option<String>,
    pub question_title: Option<String>,
    pub time_taken: String,
    pub marks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: String,
    pub title: String,
}

pub struct SubmissionService;

impl SubmissionService {
    /// Baseline for elapsed time on the admin results page: the test embedded
    /// in the first submission, if the platform included it.
    pub fn embedded_test_context(records: &[SubmissionRecord]) -> Option<&TestContext> {
        records
            .first()
            .and_then(|r| r.test.as_ref())
            .filter(|t| t.has_start_time())
    }

    /// Whether `email` has at least one submission among `records`.
    pub fn has_user_submission(records: &[SubmissionRecord], email: Option<&str>) -> bool {
        let Some(email) = email.filter(|e| !e.is_empty()) else {
            return false;
        };
        records.iter().any(|r| r.user_id.as_deref() == Some(email))
    }

    /// The question picker is only offered when the test has more than one question.
    pub fn question_options(test: Option<&TestContext>) -> Vec<QuestionOption> {
        let questions = test.map(TestContext::questions).unwrap_or_default();
        if questions.len() <= 1 {
            return Vec::new();
        }
        questions
            .iter()
            .filter_map(|q| {
                let id = q.id.as_ref()?.to_string();
                let title = q.title.clone().unwrap_or_else(|| id.clone());
                Some(QuestionOption { id, title })
            })
            .collect()
    }

    pub fn student_rows(
        records: &[SubmissionRecord],
        test: Option<&TestContext>,
        filter: &QuestionFilter,
        local: FixedOffset,
    ) -> Vec<StudentRow> {
        let start = test.and_then(|t| t.start_time(local));
        records
            .iter()
            .filter(|r| filter.matches(r))
            .map(|r| StudentRow {
                user_name: r.user_name.clone(),
                question_title: r.question_title.clone(),
                time_taken: elapsed_time(r.time_taken, start, r.submitted_at_time(local)),
                marks: r.marks.as_ref().map(|m| m.to_string()),
            })
            .collect()
    }
}
