//! Port to the remote Idea API.
//!
//! Every page talks to the API through [`IdeaApi`]. The session token is passed
//! explicitly on each call; nothing here reads the caller's session.

mod dto;
mod http_client;

use async_trait::async_trait;

use crate::auth::token::SessionToken;
use crate::models::comment::Comment;
use crate::models::idea::{Idea, IdeaDraft, IdeaPatch, VoteType};
use crate::models::user::{Credentials, CurrentUser, LoginResponse, Registration, SignUpResponse};

pub use http_client::HttpIdeaApi;

/// Shown when the API gave no usable error messages.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("API answered with status {status}")]
    Status { status: u16, messages: Vec<String> },
    #[error("undecodable API response: {0}")]
    Decode(String),
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401, .. })
    }

    /// Message for forms that surface the API's own validation errors.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { messages, .. } if !messages.is_empty() => messages.join(", "),
            _ => UNEXPECTED_ERROR.to_string(),
        }
    }
}

#[async_trait]
pub trait IdeaApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;

    async fn sign_up(&self, registration: &Registration) -> Result<SignUpResponse, ApiError>;

    async fn current_user(&self, token: &SessionToken) -> Result<CurrentUser, ApiError>;

    async fn list_ideas(&self, token: &SessionToken) -> Result<Vec<Idea>, ApiError>;

    async fn my_ideas(&self, token: &SessionToken) -> Result<Vec<Idea>, ApiError>;

    async fn get_idea(&self, token: &SessionToken, id: i64) -> Result<Idea, ApiError>;

    async fn create_idea(&self, token: &SessionToken, draft: &IdeaDraft) -> Result<(), ApiError>;

    async fn update_idea(&self, token: &SessionToken, id: i64, patch: &IdeaPatch) -> Result<(), ApiError>;

    async fn delete_idea(&self, token: &SessionToken, id: i64) -> Result<(), ApiError>;

    async fn vote(&self, token: &SessionToken, id: i64, vote: VoteType) -> Result<(), ApiError>;

    async fn list_comments(&self, token: &SessionToken, idea_id: i64) -> Result<Vec<Comment>, ApiError>;

    async fn create_comment(&self, token: &SessionToken, idea_id: i64, content: &str) -> Result<Comment, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_api_messages() {
        let err = ApiError::Status {
            status: 422,
            messages: vec!["Email is invalid".into(), "Password is too short".into()],
        };
        assert_eq!(err.user_message(), "Email is invalid, Password is too short");
    }

    #[test]
    fn falls_back_to_generic_message() {
        let bare = ApiError::Status { status: 500, messages: vec![] };
        assert_eq!(bare.user_message(), UNEXPECTED_ERROR);
        assert_eq!(ApiError::Transport("reset".into()).user_message(), UNEXPECTED_ERROR);
    }

    #[test]
    fn only_401_is_unauthorized() {
        assert!(ApiError::Status { status: 401, messages: vec![] }.is_unauthorized());
        assert!(!ApiError::Status { status: 403, messages: vec![] }.is_unauthorized());
        assert!(!ApiError::Decode("x".into()).is_unauthorized());
    }
}
