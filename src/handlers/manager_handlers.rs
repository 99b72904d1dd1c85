use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::api::IdeaApi;
use crate::auth::csrf;
use crate::auth::session::{AuthContext, auth_context};
use crate::config::AppConfig;
use crate::dispatch::Dispatcher;
use crate::errors::{AppError, render};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::messages;
use crate::models::comment::{Comment, FeedbackForm};
use crate::models::idea::Idea;
use crate::templates_structs::{ManagerDashboardTemplate, ManagerIdeaTemplate, PageContext};
use crate::view_state::{ViewState, load};

const DASHBOARD: &str = "/manager/dashboard";

/// GET /manager/dashboard
pub async fn dashboard(
    api: web::Data<dyn IdeaApi>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let auth = auth_context(&session)?;
    let ideas = load(api.list_ideas(&auth.token), messages::IDEAS_LOAD_FAILED).await;
    let ctx = PageContext::build(&session, &auth, &config.app_name, DASHBOARD);
    render(ManagerDashboardTemplate { ctx, ideas, error: None })
}

/// POST /manager/dashboard/shortlist/{id}
/// Toggles one idea's shortlist flag and re-renders the listing.
pub async fn shortlist_from_dashboard(
    api: web::Data<dyn IdeaApi>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let auth = auth_context(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let id = path.into_inner();
    let mut ideas = load(api.list_ideas(&auth.token), messages::IDEAS_LOAD_FAILED).await;
    let mut error = None;
    if let Some(list) = ideas.ready_mut() {
        if let Err(e) = Dispatcher::new(api.get_ref(), &auth.token).toggle_shortlist_in(list, id).await {
            error = Some(e.message());
        }
    }
    let ctx = PageContext::build(&session, &auth, &config.app_name, DASHBOARD);
    render(ManagerDashboardTemplate { ctx, ideas, error })
}

struct Detail {
    idea: ViewState<Idea>,
    comments: ViewState<Vec<Comment>>,
}

async fn load_detail(api: &dyn IdeaApi, auth: &AuthContext, id: i64) -> Detail {
    Detail {
        idea: load(api.get_idea(&auth.token, id), messages::IDEA_LOAD_FAILED).await,
        comments: load(api.list_comments(&auth.token, id), messages::COMMENTS_LOAD_FAILED).await,
    }
}

fn detail_page(
    config: &AppConfig,
    session: &Session,
    auth: &AuthContext,
    id: i64,
    detail: Detail,
    feedback_draft: String,
    outcome: Result<Option<&'static str>, &'static str>,
) -> ManagerIdeaTemplate {
    let (notice, error) = match outcome {
        Ok(notice) => (notice, None),
        Err(error) => (None, Some(error)),
    };
    ManagerIdeaTemplate {
        ctx: PageContext::build(session, auth, &config.app_name, DASHBOARD),
        idea_id: id,
        idea: detail.idea,
        comments: detail.comments,
        feedback_draft,
        notice,
        error,
    }
}

/// GET /manager/ideas/{id}
pub async fn show(
    api: web::Data<dyn IdeaApi>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let auth = auth_context(&session)?;
    let id = path.into_inner();
    let detail = load_detail(api.get_ref(), &auth, id).await;
    render(detail_page(&config, &session, &auth, id, detail, String::new(), Ok(None)))
}

/// POST /manager/ideas/{id}/shortlist
pub async fn shortlist(
    api: web::Data<dyn IdeaApi>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let auth = auth_context(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let id = path.into_inner();
    let mut detail = load_detail(api.get_ref(), &auth, id).await;
    let mut outcome = Ok(None);
    if let Some(idea) = detail.idea.ready_mut() {
        if let Err(e) = Dispatcher::new(api.get_ref(), &auth.token).toggle_shortlist(idea).await {
            outcome = Err(e.message());
        }
    }
    render(detail_page(&config, &session, &auth, id, detail, String::new(), outcome))
}

/// POST /manager/ideas/{id}/feedback
/// Feedback is posted as a comment tagged as coming from a manager.
pub async fn feedback(
    api: web::Data<dyn IdeaApi>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<FeedbackForm>,
) -> Result<HttpResponse, AppError> {
    let auth = auth_context(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let id = path.into_inner();
    let mut detail = load_detail(api.get_ref(), &auth, id).await;
    let result = Dispatcher::new(api.get_ref(), &auth.token)
        .submit_feedback(id, &form.feedback, &mut detail.comments)
        .await;
    let (draft, outcome) = match result {
        Ok(()) => {
            log::info!("Manager {} left feedback on idea {id}", auth.user_id);
            (String::new(), Ok(Some(messages::FEEDBACK_SENT)))
        }
        Err(e) => (form.feedback.clone(), Err(e.message())),
    };
    render(detail_page(&config, &session, &auth, id, detail, draft, outcome))
}
