//! In-process stand-in for the matching engine
//!
//! Speaks the engine's HTTP contract (`POST /trade`, `POST /cancel`,
//! `GET /status`, form-encoded parameters, JSON answers) with a trivial
//! in-memory book: orders rest until cancelled, nothing ever matches.
//! Used by the test suites and by the `stub_engine` binary for local runs.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, HeaderName, StatusCode, Uri, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A request as the engine received it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenRequest {
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Debug, Serialize)]
struct BookSummary {
    size: usize,
}

#[derive(Default)]
struct StubState {
    delay: Duration,
    books: Mutex<BTreeMap<String, BTreeSet<u64>>>,
    seen: Mutex<Vec<SeenRequest>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panicking handler must not take the whole stub down with it
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl StubState {
    async fn record(&self, uri: &Uri, headers: &HeaderMap, body: &str) {
        lock(&self.seen).push(SeenRequest {
            path: uri.path().to_string(),
            content_type: headers
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body: body.to_string(),
        });
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

type JsonReply = (StatusCode, [(HeaderName, &'static str); 1], &'static str);

fn json(status: StatusCode, body: &'static str) -> JsonReply {
    (status, [(CONTENT_TYPE, "application/json")], body)
}

fn params(body: &str) -> HashMap<String, String> {
    serde_urlencoded::from_str(body).unwrap_or_default()
}

fn required<'a>(params: &'a HashMap<String, String>, keys: &[&str]) -> Option<Vec<&'a str>> {
    keys.iter()
        .map(|k| params.get(*k).map(String::as_str).filter(|v| !v.is_empty()))
        .collect()
}

async fn trade(
    State(state): State<Arc<StubState>>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.record(&uri, &headers, &body).await;
    let params = params(&body);
    let Some(values) = required(
        &params,
        &["orderid", "tradetype", "side", "price", "quantity", "book"],
    ) else {
        return json(StatusCode::BAD_REQUEST, r#"{"error":"Missing required parameters"}"#);
    };
    let Ok(order_id) = values[0].parse::<u64>() else {
        return json(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"Engine error during processing"}"#,
        );
    };

    lock(&state.books)
        .entry(values[5].to_string())
        .or_default()
        .insert(order_id);
    json(StatusCode::OK, r#"{"message": "Order placed successfully"}"#)
}

async fn cancel(
    State(state): State<Arc<StubState>>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.record(&uri, &headers, &body).await;
    let params = params(&body);
    let Some(values) = required(&params, &["orderid", "book"]) else {
        return json(StatusCode::BAD_REQUEST, r#"{"error":"Missing required parameters"}"#);
    };

    let removed = values[0]
        .parse::<u64>()
        .ok()
        .and_then(|id| {
            lock(&state.books)
                .get_mut(values[1])
                .map(|book| book.remove(&id))
        })
        .unwrap_or(false);

    if removed {
        json(StatusCode::OK, r#"{"message": "Order Info Received"}"#)
    } else {
        json(StatusCode::NOT_FOUND, r#"{"message": "Order ID not found"}"#)
    }
}

async fn status(
    State(state): State<Arc<StubState>>,
    uri: Uri,
    headers: HeaderMap,
) -> impl IntoResponse {
    state.record(&uri, &headers, "").await;
    let summary: BTreeMap<String, BookSummary> = lock(&state.books)
        .iter()
        .map(|(name, ids)| (name.clone(), BookSummary { size: ids.len() }))
        .collect();
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "application/json")],
        serde_json::to_string(&summary).unwrap_or_else(|_| "{}".to_string()),
    )
}

/// Stub engine routes. Every request is held for `delay` before it is answered.
pub fn router(delay: Duration) -> Router {
    stub_router(Arc::new(StubState {
        delay,
        ..Default::default()
    }))
}

fn stub_router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/trade", post(trade))
        .route("/cancel", post(cancel))
        .route("/status", get(status))
        .with_state(state)
}

/// A running stub engine on an ephemeral localhost port. Stops on drop.
pub struct StubEngine {
    addr: SocketAddr,
    state: Arc<StubState>,
    task: JoinHandle<()>,
}

impl StubEngine {
    pub async fn start() -> std::io::Result<Self> {
        Self::start_with_delay(Duration::ZERO).await
    }

    /// Every request is held for `delay` before it is answered
    pub async fn start_with_delay(delay: Duration) -> std::io::Result<Self> {
        let state = Arc::new(StubState {
            delay,
            ..Default::default()
        });
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = stub_router(state.clone());
        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("stub engine stopped: {}", e);
            }
        });
        Ok(Self { addr, state, task })
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<SeenRequest> {
        lock(&self.state.seen).clone()
    }

    /// Order IDs resting on `book`
    pub fn resting(&self, book: &str) -> Vec<u64> {
        lock(&self.state.books)
            .get(book)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }
}

impl Drop for StubEngine {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// URL of a localhost port with nothing listening on it
pub async fn unreachable_url() -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}", addr))
}
