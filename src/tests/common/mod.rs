// tests/common/mod.rs
//
// One axum server plays both the authorization endpoint (`POST /token`)
// and the resource API (every other path, GET only).

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Form, State};
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use chrono::Duration;
use serde_json::json;
use tokio::task::JoinHandle;

use crate::config::settings::Configuration;
use crate::session::Session;
use crate::utils::constants::DEFAULT_MEDIA_TYPE;

pub mod fixtures;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

struct Served {
    content_type: String,
    body: String,
}

#[derive(Default)]
pub struct ApiState {
    documents: HashMap<String, Served>,
    login_failure: Option<(StatusCode, String)>,
    current_token: Mutex<String>,
    hits: Mutex<HashMap<String, usize>>,
    token_requests: Mutex<Vec<HashMap<String, String>>>,
    refreshes: AtomicUsize,
}

impl ApiState {
    pub fn new() -> Self {
        Self {
            current_token: Mutex::new("5b".to_owned()),
            ..Self::default()
        }
    }

    /// Serve an XML resource document at `path`.
    pub fn document(self, path: &str, xml: &str) -> Self {
        self.raw(path, DEFAULT_MEDIA_TYPE, xml)
    }

    pub fn raw(mut self, path: &str, content_type: &str, body: &str) -> Self {
        self.documents.insert(
            path.to_owned(),
            Served {
                content_type: content_type.to_owned(),
                body: body.to_owned(),
            },
        );
        self
    }

    /// Make every token exchange fail with `status` and `body`.
    pub fn login_failure(mut self, status: StatusCode, body: &str) -> Self {
        self.login_failure = Some((status, body.to_owned()));
        self
    }
}

async fn token(State(state): State<Arc<ApiState>>, Form(form): Form<HashMap<String, String>>) -> Response {
    state.token_requests.lock().unwrap().push(form.clone());
    if let Some((status, body)) = &state.login_failure {
        return (*status, body.clone()).into_response();
    }

    let (access_token, refresh_token, expires_in) = match form.get("grant_type").map(String::as_str) {
        Some("refresh_token") => {
            let n = state.refreshes.fetch_add(1, Ordering::SeqCst) + 1;
            (format!("fresh-{n}"), format!("rotated-{n}"), 810)
        }
        _ => ("5b".to_owned(), "p8".to_owned(), 109),
    };
    *state.current_token.lock().unwrap() = access_token.clone();

    Json(json!({
        "access_token": access_token,
        "expires_in": expires_in,
        "refresh_token": refresh_token,
        "token_type": "bearer",
        "foo": "bar"
    }))
    .into_response()
}

async fn resource(State(state): State<Arc<ApiState>>, uri: Uri, headers: HeaderMap) -> Response {
    let path = uri.path().to_owned();
    *state.hits.lock().unwrap().entry(path.clone()).or_default() += 1;

    let expected = format!("OAuth2 {}", state.current_token.lock().unwrap());
    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if authorization != Some(expected.as_str()) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    match state.documents.get(&path) {
        Some(served) => {
            let accept = headers.get(ACCEPT).and_then(|v| v.to_str().ok());
            if accept != Some(served.content_type.as_str()) {
                return StatusCode::NOT_ACCEPTABLE.into_response();
            }
            ([(CONTENT_TYPE, served.content_type.clone())], served.body.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub struct TestApi {
    pub addr: SocketAddr,
    state: Arc<ApiState>,
    handle: JoinHandle<()>,
}

impl TestApi {
    pub async fn start(state: ApiState) -> Self {
        let state = Arc::new(state);
        let router = Router::new()
            .route("/token", post(token))
            .fallback(resource)
            .with_state(state.clone());
        let (handle, addr) = spawn_axum(router).await;
        Self { addr, state, handle }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn configuration(&self) -> Configuration {
        let mut configuration = Configuration::new("1234", "zoo.net");
        configuration
            .set_default_authorization_code("5678")
            .set_token_endpoint(self.url("/token"))
            .set_api_base_uri(self.url("/"));
        configuration
    }

    /// Session holding the server's initial token pair ("5b" / "p8").
    pub fn session(&self, expires_in: Duration) -> Arc<Session> {
        Arc::new(Session::from_parts(Arc::new(self.configuration()), "5b", expires_in, "p8").unwrap())
    }

    pub fn fresh_session(&self) -> Arc<Session> {
        self.session(Duration::seconds(109))
    }

    pub fn hits(&self, path: &str) -> usize {
        self.state.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.state.hits.lock().unwrap().values().sum()
    }

    pub fn refreshes(&self) -> usize {
        self.state.refreshes.load(Ordering::SeqCst)
    }

    pub fn token_requests(&self) -> Vec<HashMap<String, String>> {
        self.state.token_requests.lock().unwrap().clone()
    }
}

impl Drop for TestApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
