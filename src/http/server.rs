//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Reject wrong verbs with 405 and unknown paths with 404
//! - Wire up middleware (tracing, body limit, request ID)
//! - Serve on a listener until the shutdown signal fires

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::forward::Forwarder;
use crate::http::error::ApiError;
use crate::http::request::assign_request_id;
use crate::http::{files, proxy};
use crate::identity::ServerId;

/// Paths served, used as metric labels.
pub const ROUTES: &[&str] = &[
    "/writeFile",
    "/readFile",
    "/listFiles",
    "/deleteFile",
    "/generateFiles",
    "/proxy",
];

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub server_id: ServerId,
    pub forwarder: Forwarder,
}

/// HTTP server for the file operations service.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
    server_id: ServerId,
}

impl HttpServer {
    /// Create a new HTTP server. `server_id` is shared by every response.
    pub fn new(
        config: ServerConfig,
        server_id: ServerId,
    ) -> Result<Self, reqwest::Error> {
        let state = AppState {
            server_id: server_id.clone(),
            forwarder: Forwarder::new(&config.forward)?,
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            server_id,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        let write_file = post(files::write_file).fallback(method_not_allowed);
        let read_file = get(files::read_file).fallback(method_not_allowed);
        let list_files = get(files::list_files).fallback(method_not_allowed);
        let delete_file = delete(files::delete_file).fallback(method_not_allowed);
        let generate_files = post(files::generate_files).fallback(method_not_allowed);
        let proxy = post(proxy::proxy_request).fallback(method_not_allowed);

        Router::new()
            .route("/writeFile", write_file)
            .route("/readFile", read_file)
            .route("/listFiles", list_files)
            .route("/deleteFile", delete_file)
            .route("/generateFiles", generate_files)
            .route("/proxy", proxy)
            .fallback(not_found)
            .layer(middleware::from_fn_with_state(state.clone(), assign_request_id))
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            server_id = %self.server_id,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn server_id(&self) -> &ServerId {
        &self.server_id
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn not_found() -> ApiError {
    ApiError::NotFound("404 page not found".to_string())
}
