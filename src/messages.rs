//! Static user-facing texts. Pages never show raw API errors except on the
//! sign-in and sign-up forms.

pub const IDEAS_LOAD_FAILED: &str = "Failed to load ideas. Please try again later.";
pub const MY_IDEAS_LOAD_FAILED: &str = "Failed to fetch your ideas. Please try again.";
pub const IDEA_LOAD_FAILED: &str = "Failed to load the idea. Please try again later.";
pub const COMMENTS_LOAD_FAILED: &str = "Failed to load comments. Please try again later.";
pub const EDIT_LOAD_FAILED: &str = "Failed to fetch the idea details.";

pub const VOTE_FAILED: &str = "Failed to process your vote. Please try again later.";
pub const COMMENT_FAILED: &str = "Failed to submit your comment. Please try again later.";
pub const COMMENT_EMPTY: &str = "Comment cannot be empty.";
pub const FEEDBACK_FAILED: &str = "Failed to submit feedback. Please try again.";
pub const FEEDBACK_EMPTY: &str = "Feedback cannot be empty.";
pub const FEEDBACK_SENT: &str = "Feedback submitted successfully!";
pub const SHORTLIST_FAILED: &str = "Failed to shortlist idea. Please try again later.";
pub const APPROVE_FAILED: &str = "Failed to approve idea. Please try again later.";
pub const DECLINE_FAILED: &str = "Failed to decline idea. Please try again later.";
pub const DELETE_FAILED: &str = "Failed to delete the idea. Please try again later.";
pub const DELETED: &str = "Idea deleted successfully";
pub const UPDATE_FAILED: &str = "Failed to update idea. Please try again.";
pub const UPDATED: &str = "Your idea has been updated successfully!";
pub const SUBMIT_FAILED: &str = "Failed to submit idea. Please try again.";
pub const SUBMITTED: &str = "Your idea has been submitted for approval!";

pub const SIGNED_UP: &str = "Account created. You can now sign in.";
pub const NO_DASHBOARD: &str = "This account has no dashboard in Idea Hub.";
