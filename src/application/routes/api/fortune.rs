use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use tower_cookies::Cookies;

use crate::application::errors::ApiError;
use crate::application::routes::support::{ensure_session, existing_session};
use crate::application::state::AppState;
use crate::domain::fortune::{DailyFortune, Notice};

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub fortune: Arc<DailyFortune>,
    pub notices: Vec<Notice>,
}

#[tracing::instrument(skip(state, cookies))]
pub(crate) async fn get_fortune(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Json<Arc<DailyFortune>>, ApiError> {
    if state.fortune_service.is_none() {
        return Err(ApiError::setup_required(&state.missing_secrets));
    }

    existing_session(&cookies)
        .and_then(|id| state.sessions.current(id))
        .map(Json)
        .ok_or_else(|| ApiError::not_found("no fortune yet; refresh first"))
}

/// Same cycle as the page's refresh button. Notices are returned inline
/// instead of being queued for the next page render.
#[tracing::instrument(skip(state, cookies))]
pub(crate) async fn refresh_fortune(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Json<RefreshResponse>, ApiError> {
    let Some(service) = &state.fortune_service else {
        return Err(ApiError::setup_required(&state.missing_secrets));
    };

    let session = ensure_session(&state, &cookies);
    let today = (state.today)();

    let mut notices = Vec::new();
    let fortune = Arc::new(service.refresh(today, &mut notices).await?);
    state
        .sessions
        .record_refresh(session, Some(Arc::clone(&fortune)), Vec::new());

    Ok(Json(RefreshResponse { fortune, notices }))
}
