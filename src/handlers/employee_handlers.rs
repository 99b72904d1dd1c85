use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::api::IdeaApi;
use crate::auth::session::{self, AuthContext, auth_context};
use crate::auth::{csrf, validate};
use crate::config::AppConfig;
use crate::dispatch::Dispatcher;
use crate::errors::{AppError, redirect, render};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::messages;
use crate::models::comment::{Comment, CommentForm};
use crate::models::idea::{Idea, IdeaDraft, IdeaForm, REGIONS, VoteForm};
use crate::templates_structs::{
    EmployeeDashboardTemplate, EmployeeIdeaTemplate, IdeaFormTemplate, MyIdeasTemplate, PageContext,
};
use crate::view_state::{ViewState, load};

const DASHBOARD: &str = "/employee/dashboard";

type Detail = (ViewState<Idea>, ViewState<Vec<Comment>>);

/// GET /employee/dashboard
/// Greets the user by name and lists every idea.
pub async fn dashboard(
    api: web::Data<dyn IdeaApi>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let auth = auth_context(&session)?;

    let greeting = match api.current_user(&auth.token).await {
        Ok(user) => Some(user.full_name).filter(|name| !name.trim().is_empty()),
        Err(e) if e.is_unauthorized() => {
            log::info!("API rejected the session token for user {}; signing out", auth.user_id);
            session::end(&session);
            return Ok(redirect("/signin"));
        }
        Err(e) => {
            log::warn!("Could not load current user ({e})");
            None
        }
    };

    let ideas = load(api.list_ideas(&auth.token), messages::IDEAS_LOAD_FAILED).await;
    let ctx = PageContext::build(&session, &auth, &config.app_name, DASHBOARD);
    render(EmployeeDashboardTemplate { ctx, greeting, ideas })
}

/// GET /employee/my-ideas
pub async fn my_ideas(
    api: web::Data<dyn IdeaApi>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let auth = auth_context(&session)?;
    let ideas = load(api.my_ideas(&auth.token), messages::MY_IDEAS_LOAD_FAILED).await;
    let ctx = PageContext::build(&session, &auth, &config.app_name, "/employee/my-ideas");
    render(MyIdeasTemplate { ctx, ideas })
}

fn submission_form(
    ctx: PageContext,
    draft: IdeaDraft,
    success: Option<&'static str>,
    errors: Vec<String>,
) -> IdeaFormTemplate {
    IdeaFormTemplate {
        ctx,
        form_action: "/employee/ideas".to_string(),
        form_title: "Submit a New Idea",
        submit_label: "Submit Idea",
        regions: &REGIONS,
        draft: ViewState::Ready(draft),
        success,
        errors,
    }
}

fn edit_form_page(
    ctx: PageContext,
    id: i64,
    draft: ViewState<IdeaDraft>,
    success: Option<&'static str>,
    errors: Vec<String>,
) -> IdeaFormTemplate {
    IdeaFormTemplate {
        ctx,
        form_action: format!("/employee/ideas/{id}/edit"),
        form_title: "Update Idea",
        submit_label: "Update Idea",
        regions: &REGIONS,
        draft,
        success,
        errors,
    }
}

/// GET /employee/ideas/new
pub async fn new_form(
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let auth = auth_context(&session)?;
    let ctx = PageContext::build(&session, &auth, &config.app_name, "/employee/ideas/new");
    render(submission_form(ctx, IdeaDraft::default(), None, vec![]))
}

/// POST /employee/ideas
/// On success the form is cleared and a confirmation shown in place.
pub async fn create(
    api: web::Data<dyn IdeaApi>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<IdeaForm>,
) -> Result<HttpResponse, AppError> {
    let auth = auth_context(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let draft = form.to_draft();
    let errors = validate::validate_idea(&draft);
    let ctx = PageContext::build(&session, &auth, &config.app_name, "/employee/ideas/new");
    if !errors.is_empty() {
        return render(submission_form(ctx, draft, None, errors));
    }

    let tmpl = match Dispatcher::new(api.get_ref(), &auth.token).submit(&draft).await {
        Ok(()) => {
            log::info!("User {} submitted idea {:?}", auth.user_id, draft.title);
            submission_form(ctx, IdeaDraft::default(), Some(messages::SUBMITTED), vec![])
        }
        Err(e) => submission_form(ctx, draft, None, vec![e.message().to_string()]),
    };
    render(tmpl)
}

/// Idea detail page state: the idea and its comments, loaded once per render.
async fn load_detail(api: &dyn IdeaApi, auth: &AuthContext, id: i64) -> Detail {
    let idea = load(api.get_idea(&auth.token, id), messages::IDEA_LOAD_FAILED).await;
    let comments = load(api.list_comments(&auth.token, id), messages::COMMENTS_LOAD_FAILED).await;
    (idea, comments)
}

fn detail_page(
    config: &AppConfig,
    session: &Session,
    auth: &AuthContext,
    id: i64,
    (idea, comments): Detail,
    comment_draft: String,
    error: Option<&'static str>,
) -> EmployeeIdeaTemplate {
    let is_owner = idea.ready().is_some_and(|idea| idea.is_owned_by(auth.user_id));
    // Detail pages sit under "My Ideas" when the viewer owns the idea.
    let nav_path = if is_owner { "/employee/my-ideas" } else { DASHBOARD };
    EmployeeIdeaTemplate {
        ctx: PageContext::build(session, auth, &config.app_name, nav_path),
        idea_id: id,
        idea,
        comments,
        is_owner,
        comment_draft,
        error,
    }
}

/// GET /employee/ideas/{id}
pub async fn show(
    api: web::Data<dyn IdeaApi>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let auth = auth_context(&session)?;
    let id = path.into_inner();
    let detail = load_detail(api.get_ref(), &auth, id).await;
    render(detail_page(&config, &session, &auth, id, detail, String::new(), None))
}

/// POST /employee/ideas/{id}/vote
/// Votes when the page showed "Vote", withdraws the vote when it showed "Unvote".
/// The API may not report `has_voted`, so the form carries the shown state.
pub async fn vote(
    api: web::Data<dyn IdeaApi>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<VoteForm>,
) -> Result<HttpResponse, AppError> {
    let auth = auth_context(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let id = path.into_inner();
    let (mut idea, comments) = load_detail(api.get_ref(), &auth, id).await;
    let mut error = None;
    if let Some(current) = idea.ready_mut() {
        current.has_voted = form.voted;
        if let Err(e) = Dispatcher::new(api.get_ref(), &auth.token).toggle_vote(current).await {
            error = Some(e.message());
        }
    }
    render(detail_page(&config, &session, &auth, id, (idea, comments), String::new(), error))
}

/// POST /employee/ideas/{id}/comments
pub async fn comment(
    api: web::Data<dyn IdeaApi>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse, AppError> {
    let auth = auth_context(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let id = path.into_inner();
    let (idea, mut comments) = load_detail(api.get_ref(), &auth, id).await;
    let (draft, error) = match Dispatcher::new(api.get_ref(), &auth.token)
        .submit_comment(id, &form.content, &mut comments)
        .await
    {
        Ok(()) => (String::new(), None),
        // Keep what was typed so it can be resent.
        Err(e) => (form.content.clone(), Some(e.message())),
    };
    render(detail_page(&config, &session, &auth, id, (idea, comments), draft, error))
}

/// POST /employee/ideas/{id}/delete
pub async fn delete(
    api: web::Data<dyn IdeaApi>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let auth = auth_context(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let id = path.into_inner();
    match Dispatcher::new(api.get_ref(), &auth.token).delete(id).await {
        Ok(()) => {
            log::info!("User {} deleted idea {id}", auth.user_id);
            session::set_flash(&session, messages::DELETED);
            Ok(redirect(DASHBOARD))
        }
        Err(e) => {
            let detail = load_detail(api.get_ref(), &auth, id).await;
            render(detail_page(&config, &session, &auth, id, detail, String::new(), Some(e.message())))
        }
    }
}

/// GET /employee/ideas/{id}/edit
pub async fn edit_form(
    api: web::Data<dyn IdeaApi>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let auth = auth_context(&session)?;
    let id = path.into_inner();
    let draft = load(api.get_idea(&auth.token, id), messages::EDIT_LOAD_FAILED)
        .await
        .map(|idea| IdeaDraft::from(&idea));
    let ctx = PageContext::build(&session, &auth, &config.app_name, "/employee/my-ideas");
    render(edit_form_page(ctx, id, draft, None, vec![]))
}

/// POST /employee/ideas/{id}/edit
/// Saving always sends the idea back for approval.
pub async fn update(
    api: web::Data<dyn IdeaApi>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<IdeaForm>,
) -> Result<HttpResponse, AppError> {
    let auth = auth_context(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let id = path.into_inner();
    let draft = form.to_draft();
    let errors = validate::validate_idea(&draft);
    let ctx = PageContext::build(&session, &auth, &config.app_name, "/employee/my-ideas");
    if !errors.is_empty() {
        return render(edit_form_page(ctx, id, ViewState::Ready(draft), None, errors));
    }

    let tmpl = match Dispatcher::new(api.get_ref(), &auth.token).update(id, &draft).await {
        Ok(()) => {
            log::info!("User {} updated idea {id}", auth.user_id);
            edit_form_page(ctx, id, ViewState::Ready(draft), Some(messages::UPDATED), vec![])
        }
        Err(e) => edit_form_page(ctx, id, ViewState::Ready(draft), None, vec![e.message().to_string()]),
    };
    render(tmpl)
}
