use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{CacheError, ErrorKind};
use crate::export;
use crate::sync::{Coordinator, Population, UserDetail};

/// Initialize the tracing subscriber.
/// Uses RUST_LOG env var for filtering (defaults to info).
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(true))
            .with(filter)
            .init();
    }
}

pub fn build_router(coordinator: Arc<Coordinator>) -> Router {
    Router::new()
        .route("/user/:user_id", get(handle_user_detail))
        .route("/api/addPost/:user_id", post(handle_add_posts))
        .route("/api/downloadExcel/:user_id", get(handle_download_excel))
        .route("/api/users", get(handle_list_users))
        .route("/api/addUser/:user_id", post(handle_add_user))
        .route("/health", get(|| async { "ok" }))
        .with_state(coordinator)
}

impl CacheError {
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::RemoteUnavailable => StatusCode::BAD_GATEWAY,
            ErrorKind::StoreError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, "request failed");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct AddPostsQuery {
    company: Option<String>,
}

async fn handle_user_detail(
    State(coordinator): State<Arc<Coordinator>>,
    Path(user_id): Path<u64>,
) -> Result<Json<UserDetail>, CacheError> {
    coordinator.user_detail(user_id).await.map(Json)
}

async fn handle_add_posts(
    State(coordinator): State<Arc<Coordinator>>,
    Path(user_id): Path<u64>,
    Query(query): Query<AddPostsQuery>,
) -> Result<Json<Population>, CacheError> {
    coordinator
        .populate_posts(user_id, query.company.as_deref())
        .await
        .map(Json)
}

async fn handle_download_excel(
    State(coordinator): State<Arc<Coordinator>>,
    Path(user_id): Path<u64>,
) -> Result<Response, CacheError> {
    let export = export::export_posts(coordinator.store(), user_id)?;

    let headers = [
        (header::CONTENT_TYPE, export.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", export.file_name),
        ),
    ];
    Ok((headers, export.bytes).into_response())
}

async fn handle_list_users(
    State(coordinator): State<Arc<Coordinator>>,
) -> Result<Json<Vec<Value>>, CacheError> {
    coordinator.list_remote_users().await.map(Json)
}

async fn handle_add_user(
    State(coordinator): State<Arc<Coordinator>>,
    Path(user_id): Path<u64>,
) -> Result<Json<Population>, CacheError> {
    let (_, population) = coordinator.ensure_user_cached(user_id).await?;
    Ok(Json(population))
}
