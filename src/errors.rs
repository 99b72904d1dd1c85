use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use std::fmt;

use crate::api::ApiError;

#[derive(Debug)]
pub enum AppError {
    Api(ApiError),
    Template(askama::Error),
    Session(String),
    /// No usable session token; answered with a redirect to sign-in.
    Unauthenticated,
    Csrf,
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Api(e) => write!(f, "API error: {e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Unauthenticated => write!(f, "Not signed in"),
            AppError::Csrf => write!(f, "Invalid or missing CSRF token"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthenticated => redirect("/signin"),
            AppError::Csrf => HttpResponse::Forbidden().body("Invalid or missing CSRF token"),
            AppError::NotFound => HttpResponse::NotFound().body("Not Found"),
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        AppError::Api(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

impl From<actix_session::SessionInsertError> for AppError {
    fn from(e: actix_session::SessionInsertError) -> Self {
        AppError::Session(e.to_string())
    }
}

/// Render a template into an HTML response.
pub fn render(tmpl: impl Template) -> Result<HttpResponse, AppError> {
    let body = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}
