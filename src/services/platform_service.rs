use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::models::{
    question::Question, submission::SubmissionRecord, test::TestContext, user::UserRecord,
};

/// Client for the coding-test platform API. Every call forwards the caller's
/// bearer token; the platform does its own authorization.
#[derive(Clone)]
pub struct PlatformService {
    client: Client,
    base_url: Url,
}

impl PlatformService {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("Platform API URL cannot be a base: {}", base_url)));
        }
        info!("Platform API client configured for {}", base_url);
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("Platform API URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        warn!(%status, "Platform API request failed: {}", message);
        Err(match status {
            StatusCode::UNAUTHORIZED => Error::Unauthorized(non_empty_or(message, "Platform rejected the token")),
            StatusCode::FORBIDDEN => Error::Forbidden(non_empty_or(message, "Not allowed")),
            StatusCode::NOT_FOUND => Error::NotFound(non_empty_or(message, "Resource not found")),
            other => Error::Upstream {
                status: other.as_u16(),
                message,
            },
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str], token: &str) -> Result<T> {
        let url = self.endpoint(segments)?;
        info!("Fetching {}", url);
        let response = self.client.get(url).bearer_auth(token).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn delete(&self, segments: &[&str], token: &str) -> Result<()> {
        let url = self.endpoint(segments)?;
        info!("Deleting {}", url);
        let response = self.client.delete(url).bearer_auth(token).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn get_submissions(&self, segments: &[&str], token: &str) -> Result<Vec<SubmissionRecord>> {
        let payload: JsonValue = self.get_json(segments, token).await?;
        match payload {
            JsonValue::Array(items) => Ok(items.into_iter().map(SubmissionRecord::from_json_lenient).collect()),
            other => {
                warn!("Unexpected submissions payload shape: {}", other);
                Err(Error::Upstream {
                    status: StatusCode::OK.as_u16(),
                    message: "Invalid response format from server".to_string(),
                })
            }
        }
    }

    /// Every submission for a test (admin).
    pub async fn submissions_by_test(&self, test_id: &str, token: &str) -> Result<Vec<SubmissionRecord>> {
        self.get_submissions(&["api", "submissions", "by-test", test_id], token).await
    }

    /// Submissions of a test the calling student may see.
    pub async fn submissions_by_test_user(&self, test_id: &str, token: &str) -> Result<Vec<SubmissionRecord>> {
        self.get_submissions(&["api", "submissions", "by-test-user", test_id], token).await
    }

    pub async fn get_test(&self, test_id: &str, token: &str) -> Result<TestContext> {
        self.get_json(&["api", "tests", test_id], token).await
    }

    pub async fn list_questions(&self, token: &str) -> Result<Vec<Question>> {
        self.get_json(&["api", "questions"], token).await
    }

    pub async fn delete_question(&self, question_id: &str, token: &str) -> Result<()> {
        self.delete(&["api", "questions", question_id], token).await
    }

    pub async fn list_users(&self, token: &str) -> Result<Vec<UserRecord>> {
        self.get_json(&["admin", "users", "all"], token).await
    }

    pub async fn clear_user_status(&self, user_id: &str, token: &str) -> Result<()> {
        self.delete(&["admin", "users", user_id, "clear-status"], token).await
    }

    /// Ends the platform session. Failures (already logged out, expired
    /// token) are logged and ignored; the caller clears its own state anyway.
    pub async fn logout(&self, token: &str) {
        let result = async {
            let url = self.endpoint(&["api", "auth", "logout"])?;
            let response = self
                .client
                .post(url)
                .bearer_auth(token)
                .json(&serde_json::json!({}))
                .send()
                .await?;
            Self::check_status(response).await?;
            Ok::<_, Error>(())
        }
        .await;

        if let Err(e) = result {
            warn!(error = %e, "Platform logout failed");
        }
    }
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
