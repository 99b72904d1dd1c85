use askama::Template;

use crate::models::comment::Comment;
use crate::models::idea::Idea;
use crate::view_state::{Presentation, ViewState};

use super::PageContext;

#[derive(Template)]
#[template(path = "manager/dashboard.html")]
pub struct ManagerDashboardTemplate {
    pub ctx: PageContext,
    pub ideas: ViewState<Vec<Idea>>,
    pub error: Option<&'static str>,
}

#[derive(Template)]
#[template(path = "manager/idea_detail.html")]
pub struct ManagerIdeaTemplate {
    pub ctx: PageContext,
    pub idea_id: i64,
    pub idea: ViewState<Idea>,
    pub comments: ViewState<Vec<Comment>>,
    pub feedback_draft: String,
    pub notice: Option<&'static str>,
    pub error: Option<&'static str>,
}
