use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::api::IdeaApi;
use crate::auth::csrf;
use crate::auth::session::{AuthContext, auth_context};
use crate::config::AppConfig;
use crate::dispatch::Dispatcher;
use crate::errors::{AppError, render};
use crate::messages;
use crate::models::idea::Idea;
use crate::templates_structs::{AdminDashboardTemplate, AdminTab, PageContext};
use crate::view_state::{ViewState, load};

#[derive(Deserialize)]
pub struct TabQuery {
    #[serde(default)]
    pub tab: AdminTab,
}

/// Approve/decline forms carry the tab they were posted from.
#[derive(Deserialize)]
pub struct ReviewForm {
    pub csrf_token: String,
    #[serde(default)]
    pub tab: AdminTab,
}

fn dashboard_page(
    config: &AppConfig,
    session: &Session,
    auth: &AuthContext,
    tab: AdminTab,
    ideas: ViewState<Vec<Idea>>,
    error: Option<&'static str>,
) -> AdminDashboardTemplate {
    let ideas = ideas.map(|all| all.into_iter().filter(|idea| tab.includes(idea)).collect());
    AdminDashboardTemplate {
        ctx: PageContext::build(session, auth, &config.app_name, "/admin/dashboard"),
        tab,
        ideas,
        error,
    }
}

/// GET /admin/dashboard?tab=all|new
pub async fn dashboard(
    api: web::Data<dyn IdeaApi>,
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<TabQuery>,
) -> Result<HttpResponse, AppError> {
    let auth = auth_context(&session)?;
    let ideas = load(api.list_ideas(&auth.token), messages::IDEAS_LOAD_FAILED).await;
    render(dashboard_page(&config, &session, &auth, query.tab, ideas, None))
}

#[derive(Clone, Copy)]
enum Decision {
    Approve,
    Decline,
}

/// Load the listing, apply the decision to it, re-render the tab it came from.
async fn review(
    api: &dyn IdeaApi,
    config: &AppConfig,
    session: &Session,
    id: i64,
    form: &ReviewForm,
    decision: Decision,
) -> Result<HttpResponse, AppError> {
    let auth = auth_context(session)?;
    csrf::validate_csrf(session, &form.csrf_token)?;

    let mut ideas = load(api.list_ideas(&auth.token), messages::IDEAS_LOAD_FAILED).await;
    let mut error = None;
    if let Some(list) = ideas.ready_mut() {
        let dispatcher = Dispatcher::new(api, &auth.token);
        let result = match decision {
            Decision::Approve => dispatcher.approve(list, id).await,
            Decision::Decline => dispatcher.decline(list, id).await,
        };
        match result {
            Ok(()) => log::info!("Admin {} reviewed idea {id}", auth.user_id),
            Err(e) => error = Some(e.message()),
        }
    }
    render(dashboard_page(config, session, &auth, form.tab, ideas, error))
}

/// POST /admin/ideas/{id}/approve
pub async fn approve(
    api: web::Data<dyn IdeaApi>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<ReviewForm>,
) -> Result<HttpResponse, AppError> {
    review(api.get_ref(), &config, &session, path.into_inner(), &form, Decision::Approve).await
}

/// POST /admin/ideas/{id}/decline
/// The API has no declined state: the idea is marked not approved and dropped
/// from the listing being reviewed.
pub async fn decline(
    api: web::Data<dyn IdeaApi>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<ReviewForm>,
) -> Result<HttpResponse, AppError> {
    review(api.get_ref(), &config, &session, path.into_inner(), &form, Decision::Decline).await
}
