#![allow(dead_code)] // Test helpers appear unused when compiled independently

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use postcache::remote::PlaceholderClient;
use postcache::store::RecordStore;
use postcache::sync::Coordinator;
use reqwest::Client;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const WAIT_ATTEMPTS: usize = 50;
const WAIT_DELAY: Duration = Duration::from_millis(100);

/// User id whose posts endpoint always fails upstream.
pub const FAILING_USER_ID: u64 = 13;

#[derive(Default)]
pub struct UpstreamState {
    /// Number of /posts requests served so far.
    pub post_requests: AtomicUsize,
}

pub struct MockUpstream {
    pub url: String,
    pub state: Arc<UpstreamState>,
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl MockUpstream {
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.handle.await;
    }
}

pub struct App {
    pub url: String,
    pub data_dir: TempDir,
    handle: JoinHandle<()>,
}

impl App {
    pub fn stop(self) {
        self.handle.abort();
    }
}

/// Best-effort check for whether binding to loopback is permitted in the current sandbox.
pub async fn can_bind_loopback() -> bool {
    match TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => {
            drop(listener);
            true
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => false,
        Err(_) => true,
    }
}

pub fn remote_user(id: u64) -> Value {
    json!({
        "id": id,
        "name": format!("User {}", id),
        "username": format!("user{}", id),
        "email": format!("user{}@example.com", id),
        "address": {
            "street": "Kulas Light",
            "suite": "Apt. 556",
            "city": format!("City {}", id),
            "zipcode": "92998-3874",
            "geo": { "lat": "-37.3159", "lng": "81.1496" }
        },
        "phone": "1-770-736-8031",
        "website": "hildegard.org",
        "company": {
            "name": format!("Company {}", id),
            "catchPhrase": "Multi-layered client-server neural-net",
            "bs": "harness real-time e-markets"
        }
    })
}

/// Spawn a JSONPlaceholder stand-in serving users 1 and 2.
///
/// Every /posts response is stamped with the request count, so callers can
/// tell a live fetch from a cached copy.
pub async fn spawn_mock_upstream() -> MockUpstream {
    let state = Arc::new(UpstreamState::default());

    let app = Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", get(get_user))
        .route("/posts", get(list_posts))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock upstream listener");
    let url = format!("http://{}", listener.local_addr().unwrap());

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    MockUpstream {
        url,
        state,
        shutdown_tx,
        handle,
    }
}

/// Spawn the postcache router against `upstream_url` with a fresh store.
pub async fn spawn_app(upstream_url: &str) -> App {
    let data_dir = TempDir::new().unwrap();
    let store = RecordStore::open(data_dir.path()).unwrap();
    let remote = PlaceholderClient::new(upstream_url).unwrap();
    let coordinator = Arc::new(Coordinator::new(store, Arc::new(remote)));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let router = postcache::build_router(coordinator);

    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    App {
        url,
        data_dir,
        handle,
    }
}

pub async fn wait_for_health(client: &Client, base_url: &str) {
    for _ in 0..WAIT_ATTEMPTS {
        if let Ok(resp) = client.get(format!("{}/health", base_url)).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        tokio::time::sleep(WAIT_DELAY).await;
    }
    panic!("service at {} never became healthy", base_url);
}

async fn list_users() -> Json<Value> {
    Json(json!([remote_user(1), remote_user(2)]))
}

async fn get_user(Path(id): Path<u64>) -> Response {
    if id == 1 || id == 2 {
        Json(remote_user(id)).into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({}))).into_response()
    }
}

async fn list_posts(
    State(state): State<Arc<UpstreamState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let generation = state.post_requests.fetch_add(1, Ordering::SeqCst) + 1;
    let user_id: u64 = params
        .get("userId")
        .and_then(|v| v.parse().ok())
        .unwrap_or_default();

    if user_id == FAILING_USER_ID {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream down").into_response();
    }

    let posts: Vec<Value> = (1..=3)
        .map(|n| {
            json!({
                "userId": user_id,
                "id": user_id * 10 + n,
                "title": format!("post {} gen {}", n, generation),
                "body": format!("body {}", n),
            })
        })
        .collect();

    Json(Value::Array(posts)).into_response()
}
