use crate::models::idea::{IdeaDraft, REGIONS};

/// Validate an email: must contain '@' and '.', max 254 chars.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.len() > 254 {
        return Some("Email must be at most 254 characters".to_string());
    }
    if !trimmed.contains('@') || !trimmed.contains('.') {
        return Some("Email must be a valid address (contain '@' and '.')".to_string());
    }
    None
}

pub fn validate_password(password: &str, confirmation: &str) -> Option<String> {
    if password.is_empty() {
        return Some("Password is required".to_string());
    }
    if password != confirmation {
        return Some("Password confirmation does not match".to_string());
    }
    None
}

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

pub fn validate_region(region: &str) -> Option<String> {
    if REGIONS.contains(&region) {
        None
    } else {
        Some("Please select a region.".to_string())
    }
}

/// All problems with an idea draft, in form order.
pub fn validate_idea(draft: &IdeaDraft) -> Vec<String> {
    [
        validate_required(&draft.title, "Title", 200),
        validate_required(&draft.description, "Description", 5000),
        validate_region(&draft.region),
    ]
    .into_iter()
    .flatten()
    .collect()
}
