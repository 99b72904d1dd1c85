pub mod admin_handlers;
pub mod auth_handlers;
pub mod employee_handlers;
pub mod home;
pub mod manager_handlers;

use actix_web::{HttpResponse, middleware, web};
use askama::Template;

use crate::auth;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::templates_structs::NotFoundTemplate;

/// All application routes. Everything outside the public pages sits behind
/// the session guard.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/", web::get().to(home::index))
        .route("/signin", web::get().to(auth_handlers::login_page))
        .route("/signin", web::post().to(auth_handlers::login_submit))
        .route("/signup", web::get().to(auth_handlers::signup_page))
        .route("/signup", web::post().to(auth_handlers::signup_submit))
        // Protected routes
        .service(
            web::scope("")
                .wrap(middleware::from_fn(auth::middleware::require_auth))
                .route("/logout", web::post().to(auth_handlers::logout))
                // Employee: /employee/ideas/new BEFORE /employee/ideas/{id}
                .route("/employee/dashboard", web::get().to(employee_handlers::dashboard))
                .route("/employee/my-ideas", web::get().to(employee_handlers::my_ideas))
                .route("/employee/ideas/new", web::get().to(employee_handlers::new_form))
                .route("/employee/ideas", web::post().to(employee_handlers::create))
                .route("/employee/ideas/{id}", web::get().to(employee_handlers::show))
                .route("/employee/ideas/{id}/edit", web::get().to(employee_handlers::edit_form))
                .route("/employee/ideas/{id}/edit", web::post().to(employee_handlers::update))
                .route("/employee/ideas/{id}/vote", web::post().to(employee_handlers::vote))
                .route("/employee/ideas/{id}/comments", web::post().to(employee_handlers::comment))
                .route("/employee/ideas/{id}/delete", web::post().to(employee_handlers::delete))
                // Manager
                .route("/manager/dashboard", web::get().to(manager_handlers::dashboard))
                .route(
                    "/manager/dashboard/shortlist/{id}",
                    web::post().to(manager_handlers::shortlist_from_dashboard),
                )
                .route("/manager/ideas/{id}", web::get().to(manager_handlers::show))
                .route("/manager/ideas/{id}/shortlist", web::post().to(manager_handlers::shortlist))
                .route("/manager/ideas/{id}/feedback", web::post().to(manager_handlers::feedback))
                // Admin
                .route("/admin/dashboard", web::get().to(admin_handlers::dashboard))
                .route("/admin/ideas/{id}/approve", web::post().to(admin_handlers::approve))
                .route("/admin/ideas/{id}/decline", web::post().to(admin_handlers::decline)),
        );
}

/// Default 404 handler (must be registered last).
pub async fn not_found(config: web::Data<AppConfig>) -> Result<HttpResponse, AppError> {
    let html = NotFoundTemplate { app_name: config.app_name.clone() }.render()?;
    Ok(HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(html))
}
