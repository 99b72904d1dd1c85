// Template context structures for Askama templates, organized by audience.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{AuthContext, take_flash};
use crate::models::nav_item::{self, NavSidebarItem};

mod admin;
mod common;
mod employee;
mod manager;

pub use self::admin::{AdminDashboardTemplate, AdminTab};
pub use self::common::{HomeTemplate, NotFoundTemplate, SignInTemplate, SignUpTemplate};
pub use self::employee::{EmployeeDashboardTemplate, EmployeeIdeaTemplate, IdeaFormTemplate, MyIdeasTemplate};
pub use self::manager::{ManagerDashboardTemplate, ManagerIdeaTemplate};

/// Common context shared by all signed-in pages.
/// Templates access these as `ctx.app_name`, `ctx.sidebar_items`, etc.
pub struct PageContext {
    pub app_name: String,
    pub role_label: &'static str,
    pub flash: Option<String>,
    pub sidebar_items: Vec<NavSidebarItem>,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, auth: &AuthContext, app_name: &str, current_path: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            role_label: auth.role.label(),
            flash: take_flash(session),
            sidebar_items: nav_item::find_navigation(auth.role, current_path),
            csrf_token: csrf::get_or_create_token(session),
        }
    }
}
