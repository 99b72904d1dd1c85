//! Mutation dispatcher.
//!
//! Each operation sends exactly one write request with the caller's token and,
//! only on success, reconciles the view state it was given. On failure the view
//! state is untouched and a [`MutationError`] carries the static message the
//! page shows inline.

use chrono::Utc;

use crate::api::{ApiError, IdeaApi};
use crate::auth::token::SessionToken;
use crate::messages;
use crate::models::comment::{Comment, manager_feedback};
use crate::models::idea::{Idea, IdeaDraft, IdeaPatch, VoteType};
use crate::view_state::ViewState;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct MutationError {
    message: &'static str,
}

impl MutationError {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

fn failed(message: &'static str) -> impl FnOnce(ApiError) -> MutationError {
    move |e| {
        log::warn!("{message} ({e})");
        MutationError::new(message)
    }
}

pub struct Dispatcher<'a> {
    api: &'a dyn IdeaApi,
    token: &'a SessionToken,
}

impl<'a> Dispatcher<'a> {
    pub fn new(api: &'a dyn IdeaApi, token: &'a SessionToken) -> Self {
        Self { api, token }
    }

    /// Vote when the viewer has not voted yet, withdraw otherwise.
    ///
    /// Points are never adjusted locally: after the vote lands the idea is read
    /// back so the server's total is shown. If that read fails only the vote
    /// flag changes.
    pub async fn toggle_vote(&self, idea: &mut Idea) -> Result<(), MutationError> {
        let vote = idea.next_vote();
        self.api
            .vote(self.token, idea.id, vote)
            .await
            .map_err(failed(messages::VOTE_FAILED))?;

        let voted = vote == VoteType::Up;
        match self.api.get_idea(self.token, idea.id).await {
            Ok(mut fresh) => {
                fresh.has_voted = voted;
                *idea = fresh;
            }
            Err(e) => {
                log::warn!("Could not refresh idea {} after voting ({e})", idea.id);
                idea.has_voted = voted;
            }
        }
        Ok(())
    }

    /// Flip the shortlist flag. Points are left as they are.
    pub async fn toggle_shortlist(&self, idea: &mut Idea) -> Result<(), MutationError> {
        let patch = IdeaPatch::shortlist(!idea.is_shortlisted);
        self.api
            .update_idea(self.token, idea.id, &patch)
            .await
            .map_err(failed(messages::SHORTLIST_FAILED))?;
        idea.toggle_shortlist();
        Ok(())
    }

    /// Shortlist toggle for an idea inside a listing.
    pub async fn toggle_shortlist_in(&self, ideas: &mut [Idea], id: i64) -> Result<(), MutationError> {
        let idea = ideas
            .iter_mut()
            .find(|idea| idea.id == id)
            .ok_or(MutationError::new(messages::SHORTLIST_FAILED))?;
        self.toggle_shortlist(idea).await
    }

    /// Post a comment and append the server's copy. Existing entries are left alone.
    /// When the comment list itself failed to load it stays in that state.
    pub async fn submit_comment(
        &self,
        idea_id: i64,
        content: &str,
        comments: &mut ViewState<Vec<Comment>>,
    ) -> Result<(), MutationError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(MutationError::new(messages::COMMENT_EMPTY));
        }
        self.post_comment(idea_id, content, comments, messages::COMMENT_FAILED).await
    }

    /// Manager feedback is a comment tagged with the manager suffix.
    pub async fn submit_feedback(
        &self,
        idea_id: i64,
        feedback: &str,
        comments: &mut ViewState<Vec<Comment>>,
    ) -> Result<(), MutationError> {
        let feedback = feedback.trim();
        if feedback.is_empty() {
            return Err(MutationError::new(messages::FEEDBACK_EMPTY));
        }
        let content = manager_feedback(feedback);
        self.post_comment(idea_id, &content, comments, messages::FEEDBACK_FAILED).await
    }

    async fn post_comment(
        &self,
        idea_id: i64,
        content: &str,
        comments: &mut ViewState<Vec<Comment>>,
        failure: &'static str,
    ) -> Result<(), MutationError> {
        let created = self
            .api
            .create_comment(self.token, idea_id, content)
            .await
            .map_err(failed(failure))?;
        if let Some(list) = comments.ready_mut() {
            list.push(created.stamped(Utc::now()));
        }
        Ok(())
    }

    pub async fn approve(&self, ideas: &mut [Idea], id: i64) -> Result<(), MutationError> {
        self.api
            .update_idea(self.token, id, &IdeaPatch::approval(true))
            .await
            .map_err(failed(messages::APPROVE_FAILED))?;
        if let Some(idea) = ideas.iter_mut().find(|idea| idea.id == id) {
            idea.approved = true;
        }
        Ok(())
    }

    /// Record the idea as not approved and drop it from the listing under review.
    pub async fn decline(&self, ideas: &mut Vec<Idea>, id: i64) -> Result<(), MutationError> {
        self.api
            .update_idea(self.token, id, &IdeaPatch::approval(false))
            .await
            .map_err(failed(messages::DECLINE_FAILED))?;
        ideas.retain(|idea| idea.id != id);
        Ok(())
    }

    pub async fn submit(&self, draft: &IdeaDraft) -> Result<(), MutationError> {
        self.api
            .create_idea(self.token, draft)
            .await
            .map_err(failed(messages::SUBMIT_FAILED))
    }

    /// Owner edit; the patch always resets approval.
    pub async fn update(&self, id: i64, draft: &IdeaDraft) -> Result<(), MutationError> {
        self.api
            .update_idea(self.token, id, &IdeaPatch::edit(draft))
            .await
            .map_err(failed(messages::UPDATE_FAILED))
    }

    pub async fn delete(&self, id: i64) -> Result<(), MutationError> {
        self.api
            .delete_idea(self.token, id)
            .await
            .map_err(failed(messages::DELETE_FAILED))
    }
}
