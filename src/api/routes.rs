//! HTTP route wiring and server setup.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    response::Json,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::store::TaskStore;

use super::tasks;
use super::types::HealthResponse;

/// Shared application state.
pub struct AppState {
    /// The flat-file task store
    pub store: TaskStore,
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let store = TaskStore::open(config.database_path.clone()).await?;

    let state = Arc::new(AppState { store });

    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server started at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/tasks/create-many", post(tasks::create_many_tasks))
        .route(
            "/tasks/:id",
            put(tasks::update_task).delete(tasks::delete_task),
        )
        .route("/tasks/:id/completed", patch(tasks::toggle_completed))
        // CSV uploads are small; 10MB leaves plenty of headroom
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> &'static str {
    "API started"
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
