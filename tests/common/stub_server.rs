//! Canned-response HTTP backend on an ephemeral port, for exercising the
//! real HTTP client and the binary end to end.

use std::sync::Arc;
use std::thread;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use parking_lot::Mutex;
use tokio::net::TcpListener;

/// Canned answer for `METHOD /path` (query string ignored when matching)
#[derive(Clone)]
pub struct Route {
    method: Method,
    path: String,
    status: StatusCode,
    body: String,
}

impl Route {
    pub fn new(method: &str, path: &str, status: u16, body: &str) -> Self {
        Self {
            method: Method::from_bytes(method.as_bytes()).expect("valid HTTP method"),
            path: path.to_string(),
            status: StatusCode::from_u16(status).expect("valid status code"),
            body: body.to_string(),
        }
    }
}

/// A request as the stub saw it
#[derive(Debug, Clone)]
pub struct Received {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: String,
}

impl Received {
    /// `METHOD /path?query`
    pub fn target(&self) -> String {
        format!("{} {}", self.method, self.uri)
    }

    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }
}

#[derive(Clone)]
struct StubState {
    routes: Arc<Vec<Route>>,
    received: Arc<Mutex<Vec<Received>>>,
}

async fn respond(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let route = state
        .routes
        .iter()
        .find(|r| r.method == method && r.path == uri.path())
        .cloned();

    state.received.lock().push(Received {
        method,
        uri,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    match route {
        Some(route) => (
            route.status,
            [(header::CONTENT_TYPE, "application/json")],
            route.body,
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub struct StubServer {
    pub url: String,
    received: Arc<Mutex<Vec<Received>>>,
}

impl StubServer {
    /// Serve `routes` from a background runtime until the test process exits
    pub fn start(routes: Vec<Route>) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new().fallback(respond).with_state(StubState {
            routes: Arc::new(routes),
            received: Arc::clone(&received),
        });

        // Bound up front so the address is known before the runtime starts
        let listener =
            std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind stub server");
        listener
            .set_nonblocking(true)
            .expect("Failed to make stub listener non-blocking");
        let url = format!("http://{}", listener.local_addr().expect("stub address"));

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to build stub runtime");
            runtime.block_on(async move {
                let listener = TcpListener::from_std(listener).expect("stub listener");
                axum::serve(listener, app).await.expect("stub server failed");
            });
        });

        StubServer { url, received }
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().clone()
    }
}
