//! Shared test server and helpers

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use maintdesk_client::{RestClient, RestClientConfig, StaticSession};

pub const TOKEN: &str = "integration-token";

/// Unwrap `Option` or fail the test early.
#[macro_export]
macro_rules! require_some {
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Unwrap `Result` or fail the test early.
#[macro_export]
macro_rules! require_ok {
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(res.is_ok(), "{}: {res:?}", format_args!($($msg)+));
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// In-memory `clients` collection served over HTTP.
#[derive(Default)]
pub struct FakeBackend {
    pub rows: Mutex<Vec<Value>>,
    pub next_id: AtomicU32,
    /// Number of requests that reached the server.
    pub hits: AtomicU32,
    /// Number of upcoming list requests that should fail with 503.
    pub fail_next_lists: AtomicU32,
    /// Last query string seen by the list endpoint.
    pub last_query: Mutex<Option<ListParams>>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ListParams {
    pub page: u32,
    pub limit: u32,
    #[serde(default)]
    pub search: String,
}

pub struct TestServer {
    pub backend: Arc<FakeBackend>,
    pub addr: SocketAddr,
}

impl TestServer {
    pub async fn start() -> Option<Self> {
        let backend = Arc::new(FakeBackend {
            next_id: AtomicU32::new(1),
            ..FakeBackend::default()
        });
        let app = Router::new()
            .route("/api/clients", get(list_clients).post(create_client))
            .route(
                "/api/clients/:id",
                axum::routing::put(update_client).delete(delete_client),
            )
            .with_state(Arc::clone(&backend));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.ok()?;
        let addr = listener.local_addr().ok()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Some(Self { backend, addr })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api/", self.addr)
    }

    pub fn client_with_session(&self, session: StaticSession) -> Option<RestClient> {
        let config = RestClientConfig::new(&self.base_url()).ok()?.with_max_retries(2);
        RestClient::new(config, Arc::new(session)).ok()
    }

    pub fn client(&self) -> Option<RestClient> {
        self.client_with_session(StaticSession::new(TOKEN))
    }

    pub async fn seed(&self, names: &[&str]) {
        let mut rows = self.backend.rows.lock().await;
        for name in names {
            let id = self.backend.next_id.fetch_add(1, Ordering::SeqCst);
            rows.push(json!({
                "id": id,
                "clientName": name,
                "contactNumber": "9999999999",
            }));
        }
    }

    pub fn hits(&self) -> u32 {
        self.backend.hits.load(Ordering::SeqCst)
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Invalid token" })),
    )
        .into_response()
}

async fn list_clients(
    State(backend): State<Arc<FakeBackend>>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Response {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return unauthorized();
    }
    if backend
        .fail_next_lists
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
    {
        return (StatusCode::SERVICE_UNAVAILABLE, "upstream down").into_response();
    }
    *backend.last_query.lock().await = Some(params.clone());

    let rows = backend.rows.lock().await;
    let needle = params.search.to_lowercase();
    let matching: Vec<&Value> = rows
        .iter()
        .filter(|row| {
            row["clientName"]
                .as_str()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect();
    let limit = params.limit.max(1) as usize;
    let total = matching.len();
    let total_pages = total.div_ceil(limit);
    let data: Vec<Value> = matching
        .into_iter()
        .skip(params.page as usize * limit)
        .take(limit)
        .cloned()
        .collect();

    Json(json!({
        "data": data,
        "page": params.page,
        "totalPages": total_pages,
        "totalRecords": total,
    }))
    .into_response()
}

async fn create_client(
    State(backend): State<Arc<FakeBackend>>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return unauthorized();
    }
    let name = body["clientName"].as_str().unwrap_or_default().to_string();
    if name.trim().is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": "clientName is required" })),
        )
            .into_response();
    }
    let mut rows = backend.rows.lock().await;
    if rows.iter().any(|r| r["clientName"] == name.as_str()) {
        // Some endpoints report failures with 200 + {message}
        return Json(json!({ "message": format!("Client {name} already exists") })).into_response();
    }
    let id = backend.next_id.fetch_add(1, Ordering::SeqCst);
    body["id"] = json!(id);
    rows.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update_client(
    State(backend): State<Arc<FakeBackend>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(mut body): Json<Value>,
) -> Response {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut rows = backend.rows.lock().await;
    let Some(row) = rows.iter_mut().find(|r| r["id"] == id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    body["id"] = json!(id);
    *row = body.clone();
    Json(body).into_response()
}

async fn delete_client(
    State(backend): State<Arc<FakeBackend>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut rows = backend.rows.lock().await;
    let before = rows.len();
    rows.retain(|r| r["id"] != id);
    if rows.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No such client" })),
        )
            .into_response();
    }
    StatusCode::OK.into_response()
}
