use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use sqlx::SqlitePool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub mod openapi;
pub mod routes;

use routes::participants;

pub fn build_router(pool: SqlitePool, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/upload-excel", post(participants::upload_excel_handler))
        .route(
            "/participants",
            get(participants::list_participants_handler)
                .put(participants::update_birth_date_handler),
        )
        .route("/clear", delete(participants::clear_participants_handler))
        .route("/openapi.json", get(openapi::openapi_json_handler))
        // Layers
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        // State
        .with_state(pool)
}
