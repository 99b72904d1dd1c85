use askama::Template;

use crate::models::comment::Comment;
use crate::models::idea::{Idea, IdeaDraft};
use crate::view_state::{Presentation, ViewState};

use super::PageContext;

#[derive(Template)]
#[template(path = "employee/dashboard.html")]
pub struct EmployeeDashboardTemplate {
    pub ctx: PageContext,
    pub greeting: Option<String>,
    pub ideas: ViewState<Vec<Idea>>,
}

#[derive(Template)]
#[template(path = "employee/my_ideas.html")]
pub struct MyIdeasTemplate {
    pub ctx: PageContext,
    pub ideas: ViewState<Vec<Idea>>,
}

/// Shared by submission and update.
#[derive(Template)]
#[template(path = "employee/idea_form.html")]
pub struct IdeaFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: &'static str,
    pub submit_label: &'static str,
    pub regions: &'static [&'static str],
    pub draft: ViewState<IdeaDraft>,
    pub success: Option<&'static str>,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "employee/idea_detail.html")]
pub struct EmployeeIdeaTemplate {
    pub ctx: PageContext,
    pub idea_id: i64,
    pub idea: ViewState<Idea>,
    pub comments: ViewState<Vec<Comment>>,
    pub is_owner: bool,
    pub comment_draft: String,
    pub error: Option<&'static str>,
}
