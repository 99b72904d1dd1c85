use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Appended to feedback a manager leaves on an idea.
pub const MANAGER_FEEDBACK_SUFFIX: &str = " \n (Feedback From Manager)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub idea_id: Option<i64>,
}

impl Comment {
    /// Date shown under the comment, empty when the API sent none.
    pub fn posted_on(&self) -> String {
        self.created_at
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// Fill in a creation time for comments the API echoed back without one.
    pub fn stamped(mut self, now: DateTime<Utc>) -> Self {
        if self.created_at.is_none() {
            self.created_at = Some(now);
        }
        self
    }
}

/// Form input for an employee comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub content: String,
    pub csrf_token: String,
}

/// Form input for manager feedback.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackForm {
    #[serde(default)]
    pub feedback: String,
    pub csrf_token: String,
}

pub fn manager_feedback(text: &str) -> String {
    format!("{text}{MANAGER_FEEDBACK_SUFFIX}")
}
