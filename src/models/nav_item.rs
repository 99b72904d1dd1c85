use crate::models::user::Role;

pub struct NavSidebarItem {
    pub label: &'static str,
    pub url: &'static str,
    pub is_active: bool,
}

fn items_for(role: Role) -> &'static [(&'static str, &'static str)] {
    match role {
        Role::Employee => &[
            ("All Ideas", "/employee/dashboard"),
            ("My Ideas", "/employee/my-ideas"),
            ("Submit New Idea", "/employee/ideas/new"),
        ],
        Role::Manager => &[("Dashboard", "/manager/dashboard")],
        Role::Admin => &[("Dashboard", "/admin/dashboard")],
        Role::Other => &[],
    }
}

/// Sidebar entries for the role, with the entry matching `current_path` marked active.
pub fn find_navigation(role: Role, current_path: &str) -> Vec<NavSidebarItem> {
    items_for(role)
        .iter()
        .map(|&(label, url)| NavSidebarItem {
            label,
            url,
            is_active: url == current_path,
        })
        .collect()
}
