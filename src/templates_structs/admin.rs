use askama::Template;
use serde::Deserialize;

use crate::models::idea::Idea;
use crate::view_state::{Presentation, ViewState};

use super::PageContext;

/// Admin dashboard tabs: approved ideas, or new ideas awaiting a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminTab {
    #[default]
    All,
    New,
}

impl AdminTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminTab::All => "all",
            AdminTab::New => "new",
        }
    }

    pub fn is_new(&self) -> bool {
        *self == AdminTab::New
    }

    /// Whether an idea belongs under this tab.
    pub fn includes(&self, idea: &Idea) -> bool {
        match self {
            AdminTab::All => idea.approved,
            AdminTab::New => !idea.approved,
        }
    }
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct AdminDashboardTemplate {
    pub ctx: PageContext,
    pub tab: AdminTab,
    pub ideas: ViewState<Vec<Idea>>,
    pub error: Option<&'static str>,
}
