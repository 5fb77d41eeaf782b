pub mod api;
pub mod error;

use ao_actions::{default_providers, ActionRegistry, Provider};
use ao_adapter::AoService;
use axum::{
    extract::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Max request body size: 1 MiB
const MAX_BODY_BYTES: usize = 1_048_576;
/// Request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct AppState {
    /// Writers (initialize/stop) only run at startup and shutdown.
    pub service: Arc<RwLock<AoService>>,
    pub actions: ActionRegistry,
    pub providers: Arc<Vec<Arc<dyn Provider>>>,
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    /// Wrap a service; the API key comes from its plugin config.
    pub fn new(service: AoService) -> Self {
        let api_key = service
            .plugin_config()
            .and_then(|c| c.api_key.as_deref())
            .map(Arc::from);
        Self {
            service: Arc::new(RwLock::new(service)),
            actions: ActionRegistry::with_defaults(),
            providers: Arc::new(default_providers()),
            api_key,
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/ao/status", get(api::status))
        .route("/v1/providers/:name", get(api::get_provider))
        .route("/v1/actions/:name", post(api::run_action))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(middleware::from_fn(require_json_content_type))
        .with_state(state)
}

/// Middleware: reject POST/PUT requests without application/json content-type.
async fn require_json_content_type(req: Request, next: Next) -> Response {
    let is_json = match req.method().as_str() {
        "POST" | "PUT" | "PATCH" => req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("application/json"))
            .unwrap_or(false),
        _ => true,
    };
    if !is_json {
        return error::AppError::unsupported_media_type().into_response();
    }
    next.run(req).await
}

async fn healthz() -> Json<serde_json::Value> {
    Json(json!({"ok": true}))
}

pub mod test {
    use super::AppState;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    /// Spawn the gate on a random port. Returns the address and a
    /// JoinHandle that keeps the server alive until dropped.
    pub async fn spawn(state: AppState) -> (SocketAddr, tokio::task::JoinHandle<()>) {
        let app = super::app(state);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (addr, handle)
    }
}
