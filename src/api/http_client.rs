//! Reqwest-backed [`IdeaApi`].
//!
//! This adapter owns transport details only: URL building, bearer headers,
//! status mapping and JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::dto::{CommentBody, ErrorBody, IdeaEnvelope, UserEnvelope, VoteBody};
use super::{ApiError, IdeaApi};
use crate::auth::token::SessionToken;
use crate::models::comment::Comment;
use crate::models::idea::{Idea, IdeaDraft, IdeaPatch, VoteType};
use crate::models::user::{Credentials, CurrentUser, LoginResponse, Registration, SignUpResponse};

const USER_AGENT: &str = concat!("ideahub/", env!("CARGO_PKG_VERSION"));

pub struct HttpIdeaApi {
    client: Client,
    base_url: Url,
}

impl HttpIdeaApi {
    /// Build a client for the API rooted at `base_url`. `timeout` of `None`
    /// leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url)?;
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self
            .client
            .request(method, self.endpoint(path)?)
            .header(reqwest::header::ACCEPT, "application/json"))
    }

    fn authed(&self, method: Method, path: &str, token: &SessionToken) -> Result<RequestBuilder, ApiError> {
        Ok(self.request(method, path)?.bearer_auth(token.as_str()))
    }
}

/// Ensure a trailing slash so relative joins keep the base path.
fn normalize_base_url(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&with_slash).map_err(|e| ApiError::InvalidUrl(format!("{trimmed}: {e}")))
}

fn idea_path(id: i64) -> String {
    format!("api/v1/ideas/{id}")
}

async fn send(request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let body = send(request).await?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn send_empty(request: RequestBuilder) -> Result<(), ApiError> {
    send(request).await.map(|_| ())
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    ApiError::Transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let messages = ErrorBody::messages(body);
    log::debug!("API status {} with {} error message(s)", status.as_u16(), messages.len());
    ApiError::Status { status: status.as_u16(), messages }
}

#[async_trait]
impl IdeaApi for HttpIdeaApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        send_json(self.request(Method::POST, "api/v1/users/login")?.json(credentials)).await
    }

    async fn sign_up(&self, registration: &Registration) -> Result<SignUpResponse, ApiError> {
        let body = UserEnvelope { user: registration };
        send_json(self.request(Method::POST, "api/v1/users")?.json(&body)).await
    }

    async fn current_user(&self, token: &SessionToken) -> Result<CurrentUser, ApiError> {
        send_json(self.authed(Method::GET, "api/v1/users/me", token)?).await
    }

    async fn list_ideas(&self, token: &SessionToken) -> Result<Vec<Idea>, ApiError> {
        send_json(self.authed(Method::GET, "api/v1/ideas", token)?).await
    }

    async fn my_ideas(&self, token: &SessionToken) -> Result<Vec<Idea>, ApiError> {
        send_json(self.authed(Method::GET, "api/v1/ideas/my_ideas", token)?).await
    }

    async fn get_idea(&self, token: &SessionToken, id: i64) -> Result<Idea, ApiError> {
        send_json(self.authed(Method::GET, &idea_path(id), token)?).await
    }

    async fn create_idea(&self, token: &SessionToken, draft: &IdeaDraft) -> Result<(), ApiError> {
        let body = IdeaEnvelope { idea: draft };
        send_empty(self.authed(Method::POST, "api/v1/ideas", token)?.json(&body)).await
    }

    async fn update_idea(&self, token: &SessionToken, id: i64, patch: &IdeaPatch) -> Result<(), ApiError> {
        let body = IdeaEnvelope { idea: patch };
        send_empty(self.authed(Method::PUT, &idea_path(id), token)?.json(&body)).await
    }

    async fn delete_idea(&self, token: &SessionToken, id: i64) -> Result<(), ApiError> {
        send_empty(self.authed(Method::DELETE, &idea_path(id), token)?).await
    }

    async fn vote(&self, token: &SessionToken, id: i64, vote: VoteType) -> Result<(), ApiError> {
        let body = VoteBody { vote_type: vote };
        let path = format!("{}/vote", idea_path(id));
        send_empty(self.authed(Method::POST, &path, token)?.json(&body)).await
    }

    async fn list_comments(&self, token: &SessionToken, idea_id: i64) -> Result<Vec<Comment>, ApiError> {
        let path = format!("{}/comments", idea_path(idea_id));
        send_json(self.authed(Method::GET, &path, token)?).await
    }

    async fn create_comment(&self, token: &SessionToken, idea_id: i64, content: &str) -> Result<Comment, ApiError> {
        let path = format!("{}/comments", idea_path(idea_id));
        send_json(self.authed(Method::POST, &path, token)?.json(&CommentBody { content })).await
    }
}
