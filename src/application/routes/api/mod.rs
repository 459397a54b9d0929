pub(crate) mod fortune;

use axum::routing::{get, post};

use crate::application::state::AppState;

pub(super) fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/fortune", get(fortune::get_fortune))
        .route("/fortune/refresh", post(fortune::refresh_fortune))
}
