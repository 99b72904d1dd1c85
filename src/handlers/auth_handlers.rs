use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::api::IdeaApi;
use crate::auth::token::SessionToken;
use crate::auth::{csrf, session, validate};
use crate::config::AppConfig;
use crate::errors::{AppError, redirect, render};
use crate::handlers::home::signed_in_landing;
use crate::messages;
use crate::models::user::{Credentials, Registration, SignInForm, SignUpForm};
use crate::templates_structs::{SignInTemplate, SignUpTemplate};

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

fn sign_in_page(config: &AppConfig, session: &Session, email: &str, error: Option<String>) -> Result<HttpResponse, AppError> {
    render(SignInTemplate {
        app_name: config.app_name.clone(),
        csrf_token: csrf::get_or_create_token(session),
        email: email.to_string(),
        error,
    })
}

pub async fn login_page(
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    // If already signed in, go straight to the dashboard
    if let Some(path) = signed_in_landing(&session) {
        return Ok(redirect(path));
    }
    sign_in_page(&config, &session, "", None)
}

pub async fn login_submit(
    api: web::Data<dyn IdeaApi>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<SignInForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let credentials = Credentials {
        email: form.email.trim().to_string(),
        password: form.password.clone(),
    };

    let response = match api.login(&credentials).await {
        Ok(response) => response,
        Err(e) => {
            log::info!("Sign-in rejected for {}: {e}", credentials.email);
            return sign_in_page(&config, &session, &credentials.email, Some(e.user_message()));
        }
    };

    let role = response.user.role;
    let Some(landing) = role.landing_path() else {
        log::info!("Sign-in for {} has role without a dashboard", credentials.email);
        return sign_in_page(&config, &session, &credentials.email, Some(messages::NO_DASHBOARD.to_string()));
    };
    let Some(token) = SessionToken::new(response.token) else {
        log::warn!("Sign-in for {} returned an empty token", credentials.email);
        return sign_in_page(
            &config,
            &session,
            &credentials.email,
            Some(crate::api::UNEXPECTED_ERROR.to_string()),
        );
    };

    if let Err(e) = token.claims() {
        log::warn!("Sign-in for {} returned a token without a readable payload ({e})", credentials.email);
        return sign_in_page(
            &config,
            &session,
            &credentials.email,
            Some(crate::api::UNEXPECTED_ERROR.to_string()),
        );
    }

    session::start(&session, &token, role)?;
    log::info!("Signed in {} as {}", credentials.email, role.as_str());
    Ok(redirect(landing))
}

pub async fn signup_page(
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    render(SignUpTemplate {
        app_name: config.app_name.clone(),
        csrf_token: csrf::get_or_create_token(&session),
        full_name: String::new(),
        email: String::new(),
        errors: vec![],
        success: None,
    })
}

pub async fn signup_submit(
    api: web::Data<dyn IdeaApi>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<SignUpForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let errors: Vec<String> = [
        validate::validate_required(&form.full_name, "Full name", 200),
        validate::validate_email(&form.email),
        validate::validate_password(&form.password, &form.password_confirmation),
    ]
    .into_iter()
    .flatten()
    .collect();

    let page = |full_name: &str, email: &str, errors: Vec<String>, success: Option<String>| {
        render(SignUpTemplate {
            app_name: config.app_name.clone(),
            csrf_token: csrf::get_or_create_token(&session),
            full_name: full_name.to_string(),
            email: email.to_string(),
            errors,
            success,
        })
    };

    if !errors.is_empty() {
        return page(&form.full_name, &form.email, errors, None);
    }

    let registration = Registration::from_full_name(
        &form.full_name,
        &form.email,
        &form.password,
        &form.password_confirmation,
    );

    match api.sign_up(&registration).await {
        Ok(response) => {
            log::info!("Registered account for {}", registration.email);
            let message = response.message.unwrap_or_else(|| messages::SIGNED_UP.to_string());
            page("", "", vec![], Some(message))
        }
        Err(e) => {
            log::info!("Sign-up rejected for {}: {e}", registration.email);
            page(&form.full_name, &form.email, vec![e.user_message()], None)
        }
    }
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session::end(&session);
    Ok(redirect("/signin"))
}
