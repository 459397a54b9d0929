mod home;

use axum::response::IntoResponse;
use axum::routing::{get, post};

use crate::application::state::AppState;

/// Generate a static asset handler that serves an embedded file with cache headers.
macro_rules! static_asset_str {
    ($name:ident, $path:literal, $content_type:literal) => {
        async fn $name() -> impl IntoResponse {
            (
                [
                    ("content-type", $content_type),
                    ("cache-control", "public, max-age=604800"),
                ],
                include_str!($path),
            )
        }
    };
}

pub(super) fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", get(home::home_page))
        .route("/refresh", post(home::refresh))
        .route("/static/css/styles.css", get(styles))
        .route("/static/js/refresh.js", get(refresh_js))
        .route("/health", get(health))
}

static_asset_str!(
    styles,
    "../../../../static/css/styles.css",
    "text/css; charset=utf-8"
);
static_asset_str!(
    refresh_js,
    "../../../../static/js/refresh.js",
    "application/javascript; charset=utf-8"
);

async fn health() -> impl IntoResponse {
    ([("content-type", "application/json")], r#"{"status":"ok"}"#)
}
