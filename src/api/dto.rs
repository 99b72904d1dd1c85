//! Request envelopes and error bodies of the Idea API.
//!
//! Domain types serialise themselves; these wrappers only add the outer keys the
//! API expects (`{"idea": ...}`, `{"user": ...}`).

use serde::{Deserialize, Serialize};

use crate::models::idea::VoteType;
use crate::models::user::Registration;

#[derive(Debug, Serialize)]
pub(super) struct IdeaEnvelope<'a, T: Serialize> {
    pub(super) idea: &'a T,
}

#[derive(Debug, Serialize)]
pub(super) struct UserEnvelope<'a> {
    pub(super) user: &'a Registration,
}

#[derive(Debug, Serialize)]
pub(super) struct VoteBody {
    pub(super) vote_type: VoteType,
}

#[derive(Debug, Serialize)]
pub(super) struct CommentBody<'a> {
    pub(super) content: &'a str,
}

/// Error payloads come as `{"errors": [...]}` or, from some endpoints, `{"error": "..."}`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    pub(super) fn messages(body: &[u8]) -> Vec<String> {
        let Ok(decoded) = serde_json::from_slice::<ErrorBody>(body) else {
            return Vec::new();
        };
        let mut messages = decoded.errors;
        if let Some(error) = decoded.error {
            messages.push(error);
        }
        messages.retain(|m| !m.trim().is_empty());
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_errors_array() {
        let body = br#"{"errors":["Email has already been taken","Password is too short"]}"#;
        assert_eq!(
            ErrorBody::messages(body),
            vec!["Email has already been taken", "Password is too short"]
        );
    }

    #[test]
    fn reads_single_error() {
        assert_eq!(ErrorBody::messages(br#"{"error":"Unauthorized"}"#), vec!["Unauthorized"]);
    }

    #[test]
    fn non_json_bodies_have_no_messages() {
        assert!(ErrorBody::messages(b"<html>502 Bad Gateway</html>").is_empty());
        assert!(ErrorBody::messages(b"").is_empty());
    }

    #[test]
    fn vote_body_uses_lowercase_type() {
        let body = serde_json::to_string(&VoteBody { vote_type: VoteType::Down }).expect("encode");
        assert_eq!(body, r#"{"vote_type":"down"}"#);
    }
}
