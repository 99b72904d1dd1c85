//! Shared test infrastructure for handler and dispatcher tests.
//!
//! - `FakeApi`: in-memory stand-in for the remote Idea API. Records every call,
//!   and can be told to fail any operation.
//! - `init_app()`: the full route table wired to a `FakeApi`.
//! - `Browser`: carries the session cookie and CSRF token between requests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::{CONTENT_TYPE, LOCATION};
use actix_web::{App, test, web};
use async_trait::async_trait;
use jsonwebtoken::{EncodingKey, Header, encode};
use regex::Regex;
use serde_json::json;

use ideahub::api::{ApiError, IdeaApi};
use ideahub::auth::session;
use ideahub::auth::token::{SessionToken, decode_claims};
use ideahub::config::AppConfig;
use ideahub::handlers;
use ideahub::models::comment::Comment;
use ideahub::models::idea::{Idea, IdeaDraft, IdeaPatch, VoteType};
use ideahub::models::user::{
    Credentials, CurrentUser, LoginResponse, LoginUser, Registration, Role, SignUpResponse,
};

// ============================================================================
// TEST ACCOUNTS
// ============================================================================

pub const PASSWORD: &str = "secret123";

pub const EMPLOYEE_ID: i64 = 1;
pub const EMPLOYEE_EMAIL: &str = "ada@example.com";
pub const EMPLOYEE_NAME: &str = "Ada Lovelace";

pub const COLLEAGUE_ID: i64 = 2;
pub const COLLEAGUE_EMAIL: &str = "grace@example.com";

pub const MANAGER_ID: i64 = 3;
pub const MANAGER_EMAIL: &str = "boss@example.com";

pub const ADMIN_ID: i64 = 4;
pub const ADMIN_EMAIL: &str = "root@example.com";

/// Signs in fine but has a role with no dashboard.
pub const AUDITOR_EMAIL: &str = "audit@example.com";

/// Signs in fine but receives a token that is not a JWT.
pub const BROKEN_TOKEN_EMAIL: &str = "broken@example.com";

const TOKEN_SECRET: &[u8] = b"fake-api-signing-secret";

/// A JWT carrying `user_id`, signed with a secret the front-end never sees.
pub fn token_for(user_id: i64) -> String {
    encode(
        &Header::default(),
        &json!({ "user_id": user_id, "exp": 4_102_444_800_i64 }),
        &EncodingKey::from_secret(TOKEN_SECRET),
    )
    .expect("encode test token")
}

pub fn session_token(user_id: i64) -> SessionToken {
    SessionToken::new(token_for(user_id)).expect("non-empty token")
}

// ============================================================================
// FIXTURES
// ============================================================================

pub fn idea(id: i64, owner: i64, title: &str, points: i64, approved: bool) -> Idea {
    Idea {
        id,
        title: title.to_string(),
        description: format!("Description of {title}"),
        region: "Europe".to_string(),
        points,
        collaborative: false,
        is_shortlisted: false,
        approved,
        user_id: Some(owner),
        has_voted: false,
    }
}

pub fn comment(id: i64, idea_id: i64, content: &str) -> Comment {
    Comment {
        id,
        content: content.to_string(),
        created_at: None,
        idea_id: Some(idea_id),
    }
}

/// Two approved ideas (one per employee) and one pending.
pub fn sample_ideas() -> Vec<Idea> {
    vec![
        idea(1, EMPLOYEE_ID, "Solar panels on the roof", 5, true),
        idea(2, COLLEAGUE_ID, "Standing desks", 12, true),
        idea(3, COLLEAGUE_ID, "Four-day week", 0, false),
    ]
}

// ============================================================================
// FAKE API
// ============================================================================

#[derive(Default)]
pub struct FakeState {
    pub ideas: Vec<Idea>,
    pub comments: Vec<Comment>,
    /// (user id, idea id) pairs that currently hold a vote.
    pub votes: Vec<(i64, i64)>,
    pub requests: Vec<String>,
    pub patches: Vec<(i64, IdeaPatch)>,
    pub created: Vec<IdeaDraft>,
    pub registrations: Vec<Registration>,
    pub failures: HashMap<&'static str, ApiError>,
    /// When set, `get_idea` leaves `has_voted` out like an API that never reports it.
    pub hide_votes: bool,
    next_id: i64,
}

pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Self::with_ideas(Vec::new())
    }

    pub fn with_ideas(ideas: Vec<Idea>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(FakeState {
                ideas,
                next_id: 100,
                ..FakeState::default()
            }),
        })
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake api state")
    }

    pub fn add_comment(&self, idea_id: i64, content: &str) {
        let mut state = self.state();
        state.next_id += 1;
        let id = state.next_id;
        state.comments.push(comment(id, idea_id, content));
    }

    /// Make `operation` fail with a 500 until cleared.
    pub fn fail(&self, operation: &'static str) {
        self.fail_with(operation, ApiError::Status { status: 500, messages: vec![] });
    }

    pub fn fail_with(&self, operation: &'static str, error: ApiError) {
        self.state().failures.insert(operation, error);
    }

    pub fn hide_votes(&self) {
        self.state().hide_votes = true;
    }

    pub fn requests(&self) -> Vec<String> {
        self.state().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state().requests.clear();
    }

    pub fn idea(&self, id: i64) -> Option<Idea> {
        self.state().ideas.iter().find(|i| i.id == id).cloned()
    }

    fn begin(&self, operation: &'static str, request: String) -> Result<MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.state();
        state.requests.push(request);
        if let Some(error) = state.failures.get(operation).cloned() {
            return Err(error);
        }
        Ok(state)
    }
}

fn caller(token: &SessionToken) -> Result<i64, ApiError> {
    decode_claims(token.as_str())
        .map(|claims| claims.user_id)
        .map_err(|_| ApiError::Status { status: 401, messages: vec!["Not Authorized".into()] })
}

fn not_found() -> ApiError {
    ApiError::Status { status: 404, messages: vec!["Idea not found".into()] }
}

#[async_trait]
impl IdeaApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let _state = self.begin("login", "POST /api/v1/users/login".into())?;
        if credentials.password != PASSWORD {
            return Err(ApiError::Status {
                status: 401,
                messages: vec!["Invalid email or password".into()],
            });
        }
        let (role, token) = match credentials.email.as_str() {
            EMPLOYEE_EMAIL => (Role::Employee, token_for(EMPLOYEE_ID)),
            COLLEAGUE_EMAIL => (Role::Employee, token_for(COLLEAGUE_ID)),
            MANAGER_EMAIL => (Role::Manager, token_for(MANAGER_ID)),
            ADMIN_EMAIL => (Role::Admin, token_for(ADMIN_ID)),
            AUDITOR_EMAIL => (Role::Other, token_for(9)),
            BROKEN_TOKEN_EMAIL => (Role::Employee, "not-a-jwt".to_string()),
            _ => {
                return Err(ApiError::Status {
                    status: 401,
                    messages: vec!["Invalid email or password".into()],
                });
            }
        };
        Ok(LoginResponse { user: LoginUser { role }, token })
    }

    async fn sign_up(&self, registration: &Registration) -> Result<SignUpResponse, ApiError> {
        let mut state = self.begin("sign_up", "POST /api/v1/users".into())?;
        state.registrations.push(registration.clone());
        Ok(SignUpResponse { message: Some("User created successfully".into()) })
    }

    async fn current_user(&self, token: &SessionToken) -> Result<CurrentUser, ApiError> {
        let _state = self.begin("current_user", "GET /api/v1/users/me".into())?;
        let user_id = caller(token)?;
        let (full_name, role) = match user_id {
            EMPLOYEE_ID => (EMPLOYEE_NAME, Role::Employee),
            COLLEAGUE_ID => ("Grace Hopper", Role::Employee),
            MANAGER_ID => ("Boss Person", Role::Manager),
            _ => ("Root Admin", Role::Admin),
        };
        Ok(CurrentUser { full_name: full_name.into(), role: Some(role) })
    }

    async fn list_ideas(&self, token: &SessionToken) -> Result<Vec<Idea>, ApiError> {
        let state = self.begin("list_ideas", "GET /api/v1/ideas".into())?;
        caller(token)?;
        Ok(state.ideas.clone())
    }

    async fn my_ideas(&self, token: &SessionToken) -> Result<Vec<Idea>, ApiError> {
        let state = self.begin("my_ideas", "GET /api/v1/ideas/my_ideas".into())?;
        let user_id = caller(token)?;
        Ok(state.ideas.iter().filter(|i| i.user_id == Some(user_id)).cloned().collect())
    }

    async fn get_idea(&self, token: &SessionToken, id: i64) -> Result<Idea, ApiError> {
        let state = self.begin("get_idea", format!("GET /api/v1/ideas/{id}"))?;
        let user_id = caller(token)?;
        let mut idea = state.ideas.iter().find(|i| i.id == id).cloned().ok_or_else(not_found)?;
        idea.has_voted = !state.hide_votes && state.votes.contains(&(user_id, id));
        Ok(idea)
    }

    async fn create_idea(&self, token: &SessionToken, draft: &IdeaDraft) -> Result<(), ApiError> {
        let mut state = self.begin("create_idea", "POST /api/v1/ideas".into())?;
        let user_id = caller(token)?;
        state.next_id += 1;
        let id = state.next_id;
        state.created.push(draft.clone());
        state.ideas.push(Idea {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            region: draft.region.clone(),
            points: 0,
            collaborative: draft.collaborative,
            is_shortlisted: false,
            approved: false,
            user_id: Some(user_id),
            has_voted: false,
        });
        Ok(())
    }

    async fn update_idea(&self, token: &SessionToken, id: i64, patch: &IdeaPatch) -> Result<(), ApiError> {
        let mut state = self.begin("update_idea", format!("PUT /api/v1/ideas/{id}"))?;
        caller(token)?;
        state.patches.push((id, patch.clone()));
        let idea = state.ideas.iter_mut().find(|i| i.id == id).ok_or_else(not_found)?;
        if let Some(title) = &patch.title {
            idea.title = title.clone();
        }
        if let Some(description) = &patch.description {
            idea.description = description.clone();
        }
        if let Some(region) = &patch.region {
            idea.region = region.clone();
        }
        if let Some(collaborative) = patch.collaborative {
            idea.collaborative = collaborative;
        }
        if let Some(shortlisted) = patch.is_shortlisted {
            idea.is_shortlisted = shortlisted;
        }
        if let Some(approved) = patch.approved {
            idea.approved = approved;
        }
        Ok(())
    }

    async fn delete_idea(&self, token: &SessionToken, id: i64) -> Result<(), ApiError> {
        let mut state = self.begin("delete_idea", format!("DELETE /api/v1/ideas/{id}"))?;
        caller(token)?;
        let before = state.ideas.len();
        state.ideas.retain(|i| i.id != id);
        if state.ideas.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    /// One point per vote, tallied server-side.
    async fn vote(&self, token: &SessionToken, id: i64, vote: VoteType) -> Result<(), ApiError> {
        let mut state = self.begin("vote", format!("POST /api/v1/ideas/{id}/vote"))?;
        let user_id = caller(token)?;
        let key = (user_id, id);
        let delta = match vote {
            VoteType::Up if !state.votes.contains(&key) => {
                state.votes.push(key);
                1
            }
            VoteType::Down if state.votes.contains(&key) => {
                state.votes.retain(|v| *v != key);
                -1
            }
            _ => 0,
        };
        let idea = state.ideas.iter_mut().find(|i| i.id == id).ok_or_else(not_found)?;
        idea.points += delta;
        Ok(())
    }

    async fn list_comments(&self, token: &SessionToken, idea_id: i64) -> Result<Vec<Comment>, ApiError> {
        let state = self.begin("list_comments", format!("GET /api/v1/ideas/{idea_id}/comments"))?;
        caller(token)?;
        Ok(state.comments.iter().filter(|c| c.idea_id == Some(idea_id)).cloned().collect())
    }

    async fn create_comment(&self, token: &SessionToken, idea_id: i64, content: &str) -> Result<Comment, ApiError> {
        let mut state = self.begin("create_comment", format!("POST /api/v1/ideas/{idea_id}/comments"))?;
        caller(token)?;
        state.next_id += 1;
        let created = comment(state.next_id, idea_id, content);
        state.comments.push(created.clone());
        Ok(created)
    }
}

// ============================================================================
// APP + BROWSER
// ============================================================================

/// Full route table backed by `api`.
pub async fn init_app(
    api: Arc<FakeApi>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let api: Arc<dyn IdeaApi> = api;
    test::init_service(
        App::new()
            .wrap(session::middleware(Key::generate(), false))
            .app_data(web::Data::from(api))
            .app_data(web::Data::new(AppConfig::default()))
            .configure(handlers::configure)
            .default_service(web::to(handlers::not_found)),
    )
    .await
}

/// Rendered response, read to the end.
pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl Page {
    pub fn assert_redirect(&self, to: &str) {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.body);
        assert_eq!(self.location.as_deref(), Some(to));
    }

    pub fn assert_ok(&self) {
        assert_eq!(self.status, StatusCode::OK, "location: {:?}", self.location);
    }

    pub fn contains(&self, text: &str) -> bool {
        self.body.contains(text)
    }

    /// Value of the first hidden input called `name`.
    pub fn hidden(&self, name: &str) -> Option<String> {
        let re = Regex::new(&format!(r#"name="{}" value="([^"]*)""#, regex::escape(name))).expect("regex");
        re.captures(&self.body).map(|caps| caps[1].to_string())
    }
}

/// Keeps the session cookie and the last CSRF token it saw.
#[derive(Default)]
pub struct Browser {
    cookie: Option<Cookie<'static>>,
    csrf: Option<String>,
}

impl Browser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn csrf(&self) -> Option<&str> {
        self.csrf.as_deref()
    }

    pub async fn get<S, B>(&mut self, app: &S, path: &str) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        self.send(app, test::TestRequest::get().uri(path)).await
    }

    /// POST a form, adding the CSRF token from the last rendered page.
    pub async fn post<S, B>(&mut self, app: &S, path: &str, fields: &[(&str, &str)]) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let csrf = self.csrf.clone().expect("a page with a CSRF token was rendered first");
        let mut all: Vec<(&str, &str)> = fields.to_vec();
        all.push(("csrf_token", csrf.as_str()));
        self.post_raw(app, path, &all).await
    }

    /// POST exactly the given fields.
    pub async fn post_raw<S, B>(&mut self, app: &S, path: &str, fields: &[(&str, &str)]) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let body = serde_urlencoded::to_string(fields).expect("encode form");
        let req = test::TestRequest::post()
            .uri(path)
            .insert_header((CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .set_payload(body);
        self.send(app, req).await
    }

    /// Sign in through the real form and return the redirect.
    pub async fn sign_in<S, B>(&mut self, app: &S, email: &str) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        self.get(app, "/signin").await.assert_ok();
        self.post(app, "/signin", &[("email", email), ("password", PASSWORD)]).await
    }

    async fn send<S, B>(&mut self, app: &S, mut req: test::TestRequest) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        if let Some(cookie) = &self.cookie {
            req = req.cookie(cookie.clone());
        }
        let resp = test::call_service(app, req.to_request()).await;

        if let Some(cookie) = resp.response().cookies().find(|c| c.name() == "id") {
            self.cookie = if cookie.value().is_empty() {
                None
            } else {
                Some(cookie.into_owned())
            };
        }

        let status = resp.status();
        let location = resp
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = test::read_body(resp).await;
        let body = String::from_utf8(bytes.to_vec()).expect("utf-8 body");

        let csrf_re = Regex::new(r#"name="csrf_token" value="([0-9a-f]+)""#).expect("regex");
        if let Some(caps) = csrf_re.captures(&body) {
            self.csrf = Some(caps[1].to_string());
        }

        Page { status, location, body }
    }
}
