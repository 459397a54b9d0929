use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use tower_cookies::Cookies;
use tracing::warn;

use crate::application::routes::render_html;
use crate::application::routes::support::{ensure_session, existing_session};
use crate::application::state::AppState;
use crate::domain::fortune::Notice;
use crate::presentation::web::templates::{HomeTemplate, SetupTemplate};
use crate::presentation::web::views::{FortuneView, NoticeView};

#[tracing::instrument(skip(state, cookies))]
pub(crate) async fn home_page(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Response, StatusCode> {
    if state.fortune_service.is_none() {
        return setup_page(&state);
    }

    let (fortune, notices) = match existing_session(&cookies) {
        Some(id) => (state.sessions.current(id), state.sessions.take_notices(id)),
        None => (None, Vec::new()),
    };

    let template = HomeTemplate {
        version_info: &crate::VERSION_INFO,
        notices: notices.iter().map(NoticeView::from_domain).collect(),
        fortune: fortune.as_deref().map(FortuneView::from_domain),
    };

    render_html(template).map(IntoResponse::into_response)
}

/// Run a refresh cycle for this browser session, then send the user back to
/// the page. Failures surface as notices on the next render.
#[tracing::instrument(skip(state, cookies))]
pub(crate) async fn refresh(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Response, StatusCode> {
    let Some(service) = &state.fortune_service else {
        return setup_page(&state)
            .map(|page| (StatusCode::SERVICE_UNAVAILABLE, page).into_response());
    };

    let session = ensure_session(&state, &cookies);
    let today = (state.today)();

    let mut notices: Vec<Notice> = Vec::new();
    let fortune = service.refresh(today, &mut notices).await.ok().map(Arc::new);
    if fortune.is_none() {
        warn!(%session, %today, "refresh aborted, keeping previous fortune");
    }
    state.sessions.record_refresh(session, fortune, notices);

    Ok(Redirect::to("/").into_response())
}

fn setup_page(state: &AppState) -> Result<Response, StatusCode> {
    let template = SetupTemplate {
        version_info: &crate::VERSION_INFO,
        missing_secrets: state.missing_secrets.clone(),
    };
    render_html(template).map(IntoResponse::into_response)
}
