//! Fake published-sheet server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `GET /pub` with whatever body and status the test set,
//! and records every request so harnesses can assert how often the sheet was
//! fetched and with which headers.
//!
//! # Example
//!
//! ```rust,ignore
//! let sheet = FakeSheet::start().await.unwrap();
//! sheet.set_body(SHEET_FESTIVAL).await;
//!
//! let source = SheetSource::new(sheet.url(), Duration::from_secs(5))?;
//! ```

use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// State shared between the router and test code.
struct SheetState {
    body: String,
    status: StatusCode,
    requests: usize,
    /// `Cache-Control` header of each request, in arrival order.
    cache_control: Vec<Option<String>>,
}

impl Default for SheetState {
    fn default() -> Self {
        Self {
            body: String::new(),
            status: StatusCode::OK,
            requests: 0,
            cache_control: Vec::new(),
        }
    }
}

/// Handle to the running fake sheet server.
pub struct FakeSheet {
    addr: SocketAddr,
    state: Arc<Mutex<SheetState>>,
}

impl FakeSheet {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(SheetState::default()));

        let app = Router::new()
            .route("/pub", get(serve_sheet))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// CSV export URL of the fake sheet.
    pub fn url(&self) -> String {
        format!("http://{}/pub?output=csv", self.addr)
    }

    /// Replace the CSV body served from now on.
    pub async fn set_body(&self, body: &str) {
        self.state.lock().await.body = body.to_string();
    }

    /// Answer every following request with `status`.
    pub async fn set_status(&self, status: u16) {
        self.state.lock().await.status = StatusCode::from_u16(status).unwrap();
    }

    /// Number of requests served so far.
    pub async fn requests(&self) -> usize {
        self.state.lock().await.requests
    }

    /// `Cache-Control` values seen so far, one per request.
    pub async fn cache_control(&self) -> Vec<Option<String>> {
        self.state.lock().await.cache_control.clone()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn serve_sheet(
    State(state): State<Arc<Mutex<SheetState>>>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    let mut state = state.lock().await;
    state.requests += 1;
    let cache_control = headers
        .get(axum::http::header::CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.cache_control.push(cache_control);
    (state.status, state.body.clone())
}
