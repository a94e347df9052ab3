//! HTTP client for the task service.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::types::{
    AuthResponse, Credentials, DashboardSummary, RegisterDraft, Task, TaskDraft, TaskPatch,
    UserProfile,
};
use super::{ApiError, ApiErrorKind, ApiResult};

/// Client for the task service REST API.
///
/// Translates domain operations into HTTP calls against a fixed base
/// endpoint and normalizes every failure into an [`ApiError`]. It never
/// mutates state containers; callers dispatch on success.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for the given base URL (no trailing slash).
    ///
    /// # Errors
    /// Returns an error if the URL is not well-formed.
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim_end_matches('/');
        url::Url::parse(trimmed).with_context(|| format!("Invalid API base URL: {base_url}"))?;
        Ok(Self {
            base_url: trimmed.to_string(),
            token: None,
            http: reqwest::Client::new(),
        })
    }

    /// Replaces the bearer token attached to task-related calls.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Returns a copy of this client carrying the given token.
    pub fn with_token(&self, token: Option<String>) -> Self {
        let mut client = self.clone();
        client.set_token(token);
        client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Auth endpoints
    // ========================================================================

    /// Registers a new account.
    pub async fn register(&self, draft: &RegisterDraft) -> ApiResult<AuthResponse> {
        self.post_auth("/users/register", draft, "Registration failed")
            .await
    }

    /// Logs in with email and password.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
        self.post_auth("/users/login", credentials, "Login failed")
            .await
    }

    /// Lists all registered users (for the assignment picker).
    pub async fn list_users(&self) -> ApiResult<Vec<UserProfile>> {
        let fallback = "Failed to fetch users";
        let request = self.http.get(self.url("/users"));
        self.execute(request, fallback).await
    }

    // ========================================================================
    // Task endpoints (bearer auth)
    // ========================================================================

    /// Fetches the caller's task collection.
    pub async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        let fallback = "Failed to fetch tasks";
        let token = self.require_token()?;
        let request = self.http.get(self.url("/todos")).bearer_auth(token);
        self.execute(request, fallback).await
    }

    /// Creates a task; the server returns the canonical record.
    ///
    /// Fails fast with a validation error on empty trimmed text,
    /// before any network call.
    pub async fn create_task(&self, draft: &TaskDraft) -> ApiResult<Task> {
        if draft.text.trim().is_empty() {
            return Err(ApiError::validation("Task text cannot be empty"));
        }
        let fallback = "Failed to add task";
        let token = self.require_token()?;
        let request = self
            .http
            .post(self.url("/todos"))
            .bearer_auth(token)
            .json(draft);
        self.execute(request, fallback).await
    }

    /// Applies a partial update and returns the updated record.
    pub async fn update_task(&self, id: &str, patch: &TaskPatch) -> ApiResult<Task> {
        let id = require_id(id)?;
        let fallback = "Failed to update task";
        let token = self.require_token()?;
        let request = self
            .http
            .put(self.url(&format!("/todos/{id}")))
            .bearer_auth(token)
            .json(patch);
        self.execute(request, fallback).await
    }

    /// Deletes a task by id.
    pub async fn delete_task(&self, id: &str) -> ApiResult<()> {
        let id = require_id(id)?;
        let fallback = "Failed to delete task";
        let token = self.require_token()?;
        let request = self
            .http
            .delete(self.url(&format!("/todos/{id}")))
            .bearer_auth(token);

        let response = send(request, fallback).await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_response(status.as_u16(), &body, fallback))
        }
    }

    /// Assigns a task to another user and returns the updated record.
    pub async fn assign_task(&self, task_id: &str, user_id: &str) -> ApiResult<Task> {
        let task_id = require_id(task_id)?;
        if user_id.trim().is_empty() {
            return Err(ApiError::validation("Select a user to assign"));
        }
        let fallback = "Failed to assign task";
        let token = self.require_token()?;
        let request = self
            .http
            .patch(self.url(&format!("/todos/{task_id}/assign")))
            .bearer_auth(token)
            .json(&json!({ "assignedTo": user_id }));
        self.execute(request, fallback).await
    }

    /// Fetches the server-computed dashboard split.
    pub async fn get_dashboard(&self) -> ApiResult<DashboardSummary> {
        let fallback = "Failed to fetch dashboard data";
        let token = self.require_token()?;
        let request = self
            .http
            .get(self.url("/todos/dashboard"))
            .bearer_auth(token);
        self.execute(request, fallback).await
    }

    // ========================================================================
    // Plumbing
    // ========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Client-side token check; task calls must not reach the network
    /// without one.
    fn require_token(&self) -> ApiResult<&str> {
        self.token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::auth("Not authenticated"))
    }

    /// Sends an auth-endpoint request where 4xx means a validation
    /// failure (bad credentials, taken email, ...) rather than an
    /// untrusted session.
    async fn post_auth<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> ApiResult<T> {
        let request = self.http.post(self.url(path)).json(body);
        let response = send(request, fallback).await?;
        let status = response.status();
        if status.is_success() {
            return decode(response, fallback).await;
        }

        let text = response.text().await.unwrap_or_default();
        let err = ApiError::from_response(status.as_u16(), &text, fallback);
        if status.is_client_error() {
            Err(ApiError::new(ApiErrorKind::Validation, err.message))
        } else {
            Err(ApiError::new(ApiErrorKind::Network, err.message))
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        fallback: &str,
    ) -> ApiResult<T> {
        let response = send(request, fallback).await?;
        let status = response.status();
        if status.is_success() {
            decode(response, fallback).await
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_response(status.as_u16(), &body, fallback))
        }
    }
}

async fn send(request: reqwest::RequestBuilder, fallback: &str) -> ApiResult<reqwest::Response> {
    request.send().await.map_err(|e| {
        tracing::debug!(error = %e, "request failed");
        ApiError::network(fallback)
    })
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response, fallback: &str) -> ApiResult<T> {
    response.json().await.map_err(|e| {
        tracing::debug!(error = %e, "undecodable response body");
        ApiError::network(fallback)
    })
}

fn require_id(id: &str) -> ApiResult<&str> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Task id is required"));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::TaskStatus;

    fn client_without_token() -> ApiClient {
        ApiClient::new("http://127.0.0.1:1").unwrap()
    }

    #[test]
    fn rejects_malformed_base_url() {
        assert!(ApiClient::new("not a url").is_err());
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let client = ApiClient::new("http://localhost:4000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:4000");
    }

    #[tokio::test]
    async fn task_calls_without_token_fail_client_side() {
        let client = client_without_token();
        let err = client.list_tasks().await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Auth);
    }

    #[tokio::test]
    async fn empty_task_text_fails_before_any_request() {
        // The unroutable port would surface as a network error if a
        // request were attempted; validation must win.
        let client = client_without_token().with_token(Some("tok".to_string()));
        let draft = TaskDraft {
            text: "   ".to_string(),
            description: "x".to_string(),
            status: TaskStatus::Pending,
        };
        let err = client.create_task(&draft).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Validation);
    }

    #[tokio::test]
    async fn blank_ids_fail_before_any_request() {
        let client = client_without_token().with_token(Some("tok".to_string()));
        let err = client.delete_task("  ").await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Validation);

        let err = client.assign_task("t1", "").await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Validation);
    }
}
