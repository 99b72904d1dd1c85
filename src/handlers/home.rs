use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::auth::session;
use crate::config::AppConfig;
use crate::errors::{AppError, redirect, render};
use crate::templates_structs::HomeTemplate;

/// Where a visitor who is already signed in belongs, if anywhere.
pub(crate) fn signed_in_landing(session: &Session) -> Option<&'static str> {
    session::auth_context(session)
        .ok()
        .and_then(|auth| auth.role.landing_path())
}

/// GET /
pub async fn index(
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    if let Some(path) = signed_in_landing(&session) {
        return Ok(redirect(path));
    }
    render(HomeTemplate { app_name: config.app_name.clone() })
}
