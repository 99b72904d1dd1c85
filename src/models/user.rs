use serde::{Deserialize, Serialize};

/// Account role as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Manager,
    Admin,
    /// Any role string this front-end has no pages for.
    #[serde(other)]
    Other,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
            Role::Admin => "admin",
            Role::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "employee" => Role::Employee,
            "manager" => Role::Manager,
            "admin" => Role::Admin,
            _ => Role::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Employee => "Employee",
            Role::Manager => "Manager",
            Role::Admin => "Admin",
            Role::Other => "Guest",
        }
    }

    /// Where a freshly signed-in user of this role lands.
    pub fn landing_path(&self) -> Option<&'static str> {
        match self {
            Role::Employee => Some("/employee/dashboard"),
            Role::Manager => Some("/manager/dashboard"),
            Role::Admin => Some("/admin/dashboard"),
            Role::Other => None,
        }
    }
}

/// `GET /users/me`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentUser {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Body of `POST /users/login`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: LoginUser,
    pub token: String,
}

/// Account fields sent to `POST /users`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub first_name: String,
    pub last_name: String,
}

impl Registration {
    /// The first word of the full name becomes the first name, the rest the last name.
    pub fn from_full_name(full_name: &str, email: &str, password: &str, confirmation: &str) -> Self {
        let mut parts = full_name.split_whitespace();
        let first_name = parts.next().unwrap_or_default().to_string();
        let last_name = parts.collect::<Vec<_>>().join(" ");
        Self {
            email: email.trim().to_string(),
            password: password.to_string(),
            password_confirmation: confirmation.to_string(),
            first_name,
            last_name,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignUpResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Sign-in form input.
#[derive(Debug, Clone, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub csrf_token: String,
}

/// Sign-up form input.
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirmation: String,
    pub csrf_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_roles_decode_as_other() {
        let role: Role = serde_json::from_str("\"auditor\"").expect("decode");
        assert_eq!(role, Role::Other);
        assert_eq!(role.landing_path(), None);
    }

    #[test]
    fn role_round_trips_through_session_string() {
        for role in [Role::Employee, Role::Manager, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), role);
        }
    }

    #[test]
    fn full_name_splits_on_first_word() {
        let reg = Registration::from_full_name("Ada  King Lovelace", "ada@example.com", "pw", "pw");
        assert_eq!(reg.first_name, "Ada");
        assert_eq!(reg.last_name, "King Lovelace");

        let single = Registration::from_full_name("Plato", "p@example.com", "pw", "pw");
        assert_eq!(single.first_name, "Plato");
        assert_eq!(single.last_name, "");
    }

    #[test]
    fn login_response_decodes() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"user":{"role":"manager","id":3},"token":"abc"}"#).expect("decode");
        assert_eq!(resp.user.role, Role::Manager);
        assert_eq!(resp.token, "abc");
    }
}
