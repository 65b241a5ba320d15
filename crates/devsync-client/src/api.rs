// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed HTTP client for the DevSync REST API.

use devsync_core::ops::membership::MemberListing;
use devsync_core::{
    DevsyncError, MemberRole, Membership, Message, Project, Task, TaskStatus, User,
};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ClientError;
use crate::session::{AuthResponse, Session};

/// A dashboard entry: the project plus the caller's role on it.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectListing {
    #[serde(flatten)]
    pub project: Project,
    pub role: Option<String>,
}

/// The aggregated project page.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub role: Option<String>,
    pub owner: User,
    pub members: Vec<Membership>,
    pub tasks: Vec<Task>,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTaskRequest {
    pub project_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// Partial task update. `Some(None)` sends an explicit `null`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    field: Option<String>,
}

/// Rebuild the server-side error from a failed response.
fn error_from(status: StatusCode, body: Option<ErrorBody>) -> ClientError {
    let (message, field) = match body {
        Some(b) => (b.error, b.field),
        None => (status.to_string(), None),
    };
    let err = match status {
        StatusCode::BAD_REQUEST => DevsyncError::Validation {
            field: field.unwrap_or_else(|| "body".into()),
            message,
        },
        StatusCode::UNAUTHORIZED => DevsyncError::Unauthorized(message),
        StatusCode::FORBIDDEN => DevsyncError::Forbidden(message),
        StatusCode::NOT_FOUND => DevsyncError::NotFound(message),
        StatusCode::CONFLICT => DevsyncError::Conflict(message),
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            return ClientError::Unavailable(message);
        }
        _ => DevsyncError::Internal(message),
    };
    ClientError::Api(err)
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, session: Option<&Session>) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{path}", self.base_url));
        match session {
            Some(session) => builder.bearer_auth(&session.token),
            None => builder,
        }
    }

    async fn check(resp: Response) -> Result<Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.json::<ErrorBody>().await.ok();
        Err(error_from(status, body))
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
        let resp = Self::check(builder.send().await?).await?;
        Ok(resp.json::<T>().await?)
    }

    async fn send_empty(builder: RequestBuilder) -> Result<(), ClientError> {
        Self::check(builder.send().await?).await?;
        Ok(())
    }

    // --- accounts ---

    pub async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<Session, ClientError> {
        let body = json!({ "email": email, "name": name, "password": password });
        let resp: AuthResponse =
            Self::send(self.request(Method::POST, "/auth/register", None).json(&body)).await?;
        Session::try_from(resp)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let body = json!({ "email": email, "password": password });
        let resp: AuthResponse =
            Self::send(self.request(Method::POST, "/auth/login", None).json(&body)).await?;
        Session::try_from(resp)
    }

    pub async fn me(&self, session: &Session) -> Result<User, ClientError> {
        Self::send(self.request(Method::GET, "/auth/me", Some(session))).await
    }

    // --- projects ---

    pub async fn list_projects(&self, session: &Session) -> Result<Vec<ProjectListing>, ClientError> {
        Self::send(self.request(Method::GET, "/projects", Some(session))).await
    }

    pub async fn create_project(
        &self,
        session: &Session,
        name: &str,
        description: Option<&str>,
    ) -> Result<Project, ClientError> {
        let body = json!({ "name": name, "description": description });
        Self::send(self.request(Method::POST, "/projects", Some(session)).json(&body)).await
    }

    pub async fn project(&self, session: &Session, id: &str) -> Result<ProjectView, ClientError> {
        Self::send(self.request(Method::GET, &format!("/projects/{id}"), Some(session))).await
    }

    pub async fn delete_project(&self, session: &Session, id: &str) -> Result<(), ClientError> {
        Self::send_empty(self.request(Method::DELETE, &format!("/projects/{id}"), Some(session)))
            .await
    }

    // --- members ---

    pub async fn members(&self, session: &Session, project_id: &str) -> Result<MemberListing, ClientError> {
        Self::send(self.request(Method::GET, &format!("/members/{project_id}"), Some(session))).await
    }

    pub async fn invite(
        &self,
        session: &Session,
        project_id: &str,
        email: &str,
        role: Option<MemberRole>,
    ) -> Result<Membership, ClientError> {
        let body = json!({ "email": email, "role": role });
        Self::send(
            self.request(Method::POST, &format!("/members/{project_id}"), Some(session))
                .json(&body),
        )
        .await
    }

    pub async fn change_role(
        &self,
        session: &Session,
        project_id: &str,
        user_id: &str,
        role: MemberRole,
    ) -> Result<Membership, ClientError> {
        Self::send(
            self.request(
                Method::PUT,
                &format!("/members/{project_id}/{user_id}"),
                Some(session),
            )
            .json(&json!({ "role": role })),
        )
        .await
    }

    pub async fn remove_member(
        &self,
        session: &Session,
        project_id: &str,
        user_id: &str,
    ) -> Result<(), ClientError> {
        Self::send_empty(self.request(
            Method::DELETE,
            &format!("/members/{project_id}/{user_id}"),
            Some(session),
        ))
        .await
    }

    // --- tasks ---

    pub async fn tasks(&self, session: &Session, project_id: &str) -> Result<Vec<Task>, ClientError> {
        Self::send(self.request(
            Method::GET,
            &format!("/tasks/by-project/{project_id}"),
            Some(session),
        ))
        .await
    }

    pub async fn create_task(&self, session: &Session, task: &NewTaskRequest) -> Result<Task, ClientError> {
        Self::send(self.request(Method::POST, "/tasks", Some(session)).json(task)).await
    }

    pub async fn update_task(
        &self,
        session: &Session,
        task_id: &str,
        update: &TaskUpdate,
    ) -> Result<Task, ClientError> {
        Self::send(
            self.request(Method::PUT, &format!("/tasks/{task_id}"), Some(session))
                .json(update),
        )
        .await
    }

    pub async fn delete_task(&self, session: &Session, task_id: &str) -> Result<(), ClientError> {
        Self::send_empty(self.request(Method::DELETE, &format!("/tasks/{task_id}"), Some(session)))
            .await
    }

    // --- messages ---

    pub async fn messages(&self, session: &Session, project_id: &str) -> Result<Vec<Message>, ClientError> {
        Self::send(self.request(
            Method::GET,
            &format!("/messages/by-project/{project_id}"),
            Some(session),
        ))
        .await
    }

    pub async fn post_message(
        &self,
        session: &Session,
        project_id: &str,
        content: &str,
    ) -> Result<Message, ClientError> {
        let body = json!({ "projectId": project_id, "content": content });
        Self::send(self.request(Method::POST, "/messages", Some(session)).json(&body)).await
    }
}
