use crate::error::Result;
use crate::models::question::Question;
use crate::services::platform_service::PlatformService;
use crate::views::state::ViewState;

#[derive(Debug, Clone, Default)]
pub struct QuestionListView {
    pub questions: ViewState<Vec<Question>>,
    deleting_id: Option<String>,
    action_error: Option<String>,
}

impl QuestionListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, platform: &PlatformService, token: &str) {
        self.questions = ViewState::Loading;
        let result = platform.list_questions(token).await;
        self.finish_load(result);
    }

    pub fn finish_load(&mut self, result: Result<Vec<Question>>) {
        self.questions = match result {
            Ok(questions) => ViewState::Loaded(questions),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch questions");
                ViewState::Failed("Failed to fetch questions".to_string())
            }
        };
    }

    pub fn is_empty(&self) -> bool {
        self.questions.data().is_some_and(Vec::is_empty)
    }

    pub fn deleting_id(&self) -> Option<&str> {
        self.deleting_id.as_deref()
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    /// Returns false while another delete is still in flight.
    pub fn begin_delete(&mut self, id: &str) -> bool {
        if self.deleting_id.is_some() {
            return false;
        }
        self.deleting_id = Some(id.to_string());
        self.action_error = None;
        true
    }

    pub fn finish_delete(&mut self, id: &str, result: Result<()>) {
        match result {
            Ok(()) => {
                if let Some(questions) = self.questions.data_mut() {
                    questions.retain(|q| q.id.as_str() != id);
                }
            }
            Err(e) => {
                tracing::warn!(question_id = id, error = %e, "Failed to delete question");
                self.action_error = Some("Failed to delete question".to_string());
            }
        }
        self.deleting_id = None;
    }

    pub async fn delete(&mut self, platform: &PlatformService, token: &str, id: &str) {
        if !self.begin_delete(id) {
            return;
        }
        let result = platform.delete_question(id, token).await;
        self.finish_delete(id, result);
    }
}
