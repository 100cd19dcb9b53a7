use crate::error::Result;
use crate::models::user::UserRecord;
use crate::services::{
    platform_service::PlatformService,
    user_service::{StatusFilter, UserService},
};
use crate::views::state::ViewState;

/// Admin page of platform accounts and their login status.
#[derive(Debug, Clone, Default)]
pub struct UserDetailsView {
    pub users: ViewState<Vec<UserRecord>>,
    pub search: String,
    pub status: StatusFilter,
    updating_id: Option<String>,
    action_error: Option<String>,
}

impl UserDetailsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, platform: &PlatformService, token: &str) {
        self.users = ViewState::Loading;
        let result = platform.list_users(token).await;
        self.finish_load(result);
    }

    pub fn finish_load(&mut self, result: Result<Vec<UserRecord>>) {
        self.users = match result {
            Ok(users) => ViewState::Loaded(users),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch user details");
                ViewState::Failed("Failed to fetch user details".to_string())
            }
        };
    }

    pub fn filtered(&self) -> Vec<UserRecord> {
        let users = self.users.data().map(Vec::as_slice).unwrap_or_default();
        UserService::filter_users(users, self.status, &self.search)
    }

    /// `(shown, total)` for the "Showing X of Y users" line.
    pub fn counts(&self) -> (usize, usize) {
        let total = self.users.data().map(Vec::len).unwrap_or(0);
        (self.filtered().len(), total)
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.status = StatusFilter::All;
    }

    pub fn updating_id(&self) -> Option<&str> {
        self.updating_id.as_deref()
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    /// Resolves the id to send for `user` and marks it as updating. `None`
    /// when the user carries no id or is not logged in.
    pub fn begin_clear_status(&mut self, user: &UserRecord) -> Option<String> {
        if !user.logged_in {
            return None;
        }
        let id = user.identifier()?.to_string();
        self.updating_id = Some(id.clone());
        Some(id)
    }

    pub fn finish_clear_status(&mut self, user_id: &str, result: Result<()>) {
        match result {
            Ok(()) => {
                if let Some(users) = self.users.data_mut() {
                    UserService::mark_logged_out(users, user_id);
                }
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Failed to clear user status");
                self.action_error = Some("Failed to clear user status".to_string());
            }
        }
        self.updating_id = None;
    }

    pub async fn clear_status(&mut self, platform: &PlatformService, token: &str, user: &UserRecord) {
        let Some(user_id) = self.begin_clear_status(user) else {
            return;
        };
        let result = platform.clear_user_status(&user_id, token).await;
        self.finish_clear_status(&user_id, result);
    }
}
