use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};

use crate::application::services::SessionId;
use crate::application::state::AppState;

pub(crate) const SESSION_COOKIE_NAME: &str = "apod_fortune_session";

/// The session named by the request cookie, if any.
pub(crate) fn existing_session(cookies: &Cookies) -> Option<SessionId> {
    cookies
        .get(SESSION_COOKIE_NAME)
        .and_then(|c| SessionId::parse(c.value()))
}

/// The request's session, issuing a new cookie when there is none.
pub(crate) fn ensure_session(state: &AppState, cookies: &Cookies) -> SessionId {
    if let Some(id) = existing_session(cookies) {
        return id;
    }

    let id = SessionId::generate();
    let cookie = Cookie::build((SESSION_COOKIE_NAME, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(!state.insecure_cookies)
        .build();
    cookies.add(cookie);
    id
}
