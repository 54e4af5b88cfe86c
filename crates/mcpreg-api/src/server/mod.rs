//! Registry Server
//!
//! HTTP server exposing the registry catalog as JSON over REST.
//!

mod error;
mod handlers;
pub mod logging_middleware;
mod state;

pub use error::{ApiError, ErrorBody};
pub use handlers::HealthResponse;
pub use state::AppState;

use anyhow::Context as _;
use axum::{
    extract::Request,
    http::{header, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use mcpreg_core::{branding, Catalog};
use std::any::Any;
use std::sync::Arc;
use tower::{Layer, ServiceBuilder};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Registry server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS for browser access
    pub enable_cors: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: branding::DEFAULT_PORT,
            enable_cors: true,
        }
    }
}

impl ApiConfig {
    /// `host:port` to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the base URL for this server
    pub fn base_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}

/// Read-only registry HTTP server
pub struct RegistryServer {
    config: ApiConfig,
    state: AppState,
}

impl RegistryServer {
    pub fn new(config: ApiConfig, catalog: Arc<Catalog>) -> Self {
        info!("[Api] Initializing with {} servers", catalog.len());
        Self {
            config,
            state: AppState::new(catalog),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Build the Axum router
    pub fn router(&self) -> Router {
        let routes = Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health))
            .route(&branding::api_path("/servers"), get(handlers::list_servers))
            .route(
                &branding::api_path("/servers/{name}/versions"),
                get(handlers::list_versions),
            )
            .route(
                &branding::api_path("/servers/{name}/versions/latest"),
                get(handlers::latest_version),
            )
            .route(
                &branding::api_path("/servers/{name}/versions/{version}"),
                get(handlers::specific_version),
            )
            .fallback(handlers::not_found)
            .with_state(self.state.clone());

        with_middleware(routes, self.config.enable_cors)
    }

    /// Run the server until Ctrl-C
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.bind_addr();

        info!("[Api] Starting on {}", addr);
        info!(
            "[Api] CORS: {}",
            if self.config.enable_cors {
                "enabled"
            } else {
                "disabled"
            }
        );

        let router = self.router();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        info!(
            "[Api] Ready: {}{}",
            self.config.base_url(),
            branding::api_path("/servers")
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        info!("[Api] Stopped");
        Ok(())
    }

    /// Start the server in the background
    ///
    /// Returns a JoinHandle that can be used to wait for completion or abort.
    pub fn spawn(self) -> tokio::task::JoinHandle<anyhow::Result<()>> {
        tokio::spawn(async move { self.run().await })
    }
}

/// Layers shared by every route: panic capture, tracing, CORS, request logging
/// and trailing-slash trimming
pub(crate) fn with_middleware(routes: Router, enable_cors: bool) -> Router {
    let mut router = routes.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(panic_response)),
    );

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(AnyOrigin)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);
        router = router
            .layer(cors)
            .layer(middleware::from_fn(preflight_no_content));
    }

    let router = router.layer(middleware::from_fn(
        logging_middleware::http_logging_middleware,
    ));

    // Routing happens inside the router, so slashes are trimmed before it sees the path
    Router::new().fallback_service(NormalizePathLayer::trim_trailing_slash().layer(router))
}

/// Preflight answers carry no body; report them as 204
async fn preflight_no_content(request: Request, next: Next) -> Response {
    let is_preflight = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;
    if is_preflight && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown error".to_string()
    };

    error!("[Api] Handler panicked: {}", message);
    ApiError::Internal(message).into_response()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("[Api] Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("[Api] Shutdown requested");
}
