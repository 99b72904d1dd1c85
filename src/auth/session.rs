use actix_session::{Session, SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};

use crate::auth::token::SessionToken;
use crate::errors::AppError;
use crate::models::user::Role;

const TOKEN_KEY: &str = "token";
const ROLE_KEY: &str = "role";
const FLASH_KEY: &str = "flash";

/// Cookie session holding the API token. The cookie is signed and encrypted
/// with `key`, so the token never reaches the browser in clear.
pub fn middleware(key: Key, secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build()
}

/// Who is calling, as far as this front-end can tell.
///
/// `user_id` comes from the unverified token payload and is only fit for
/// display decisions; the API authorises every call on its own.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub token: SessionToken,
    pub user_id: i64,
    pub role: Role,
}

/// Store a freshly issued token. The session id is rotated first.
pub fn start(session: &Session, token: &SessionToken, role: Role) -> Result<(), AppError> {
    session.renew();
    session.insert(TOKEN_KEY, token)?;
    session.insert(ROLE_KEY, role.as_str())?;
    Ok(())
}

pub fn end(session: &Session) {
    session.purge();
}

pub fn get_token(session: &Session) -> Option<SessionToken> {
    session
        .get::<String>(TOKEN_KEY)
        .unwrap_or(None)
        .and_then(SessionToken::new)
}

pub fn get_role(session: &Session) -> Role {
    session
        .get::<String>(ROLE_KEY)
        .unwrap_or(None)
        .map(|r| Role::parse(&r))
        .unwrap_or(Role::Other)
}

/// Resolve the caller. A token that does not decode counts as no token: the
/// session is cleared and the caller is sent to sign in.
pub fn auth_context(session: &Session) -> Result<AuthContext, AppError> {
    let token = get_token(session).ok_or(AppError::Unauthenticated)?;
    let claims = token.claims().map_err(|e| {
        log::info!("Discarding undecodable session token: {e}");
        end(session);
        AppError::Unauthenticated
    })?;
    Ok(AuthContext {
        token,
        user_id: claims.user_id,
        role: get_role(session),
    })
}

pub fn set_flash(session: &Session, message: &str) {
    let _ = session.insert(FLASH_KEY, message);
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}
