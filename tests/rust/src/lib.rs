//! Shared test utilities and fixtures for McpReg integration tests.

use mcpreg_api::{ApiConfig, RegistryServer};
use mcpreg_core::Catalog;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub mod fixtures {
    use serde_json::{json, Value};

    /// An enveloped record with one npm package
    pub fn record(name: &str, version: &str, latest: bool, updated_at: &str) -> Value {
        json!({
            "server": {
                "name": name,
                "description": format!("{} for testing", name),
                "version": version,
                "packages": [{
                    "registryType": "npm",
                    "identifier": format!("@test/{}", name.rsplit('/').next().unwrap_or(name)),
                    "version": version,
                    "transport": {"type": "stdio"}
                }]
            },
            "_meta": {"io.modelcontextprotocol.registry/official": {
                "status": "active",
                "publishedAt": updated_at,
                "updatedAt": updated_at,
                "isLatest": latest
            }}
        })
    }

    /// Mixed dataset: two foo-tool releases, a remote-only server and a legacy flat record
    pub fn dataset() -> Value {
        json!({"servers": [
            record("io.github.acme/foo-tool", "1.0.0", true, "2025-09-10T12:00:00Z"),
            record("io.github.acme/foo-tool", "0.9.0", false, "2025-06-01T08:30:00Z"),
            {
                "server": {
                    "name": "io.github.weather/forecast",
                    "title": "Weather Forecast",
                    "description": "Hourly FORECASTS over streamable HTTP",
                    "version": "2.1.0",
                    "remotes": [{"type": "streamable-http", "url": "https://weather.example.com/mcp"}]
                },
                "_meta": {"io.modelcontextprotocol.registry/official": {
                    "status": "active",
                    "updatedAt": "2025-08-15T00:00:00Z",
                    "isLatest": true
                }}
            },
            {
                "name": "github-mcp-server",
                "description": "GitHub's official MCP server",
                "version": "0.4.0",
                "packages": [{
                    "registry_name": "docker",
                    "name": "ghcr.io/github/github-mcp-server",
                    "version": "0.4.0",
                    "url": "https://github.com/github/github-mcp-server"
                }],
                "updated_at": "2025-07-01T00:00:00Z",
                "is_latest": true
            }
        ]})
    }

    pub fn catalog() -> mcpreg_core::Catalog {
        mcpreg_core::Catalog::from_json(&dataset().to_string()).unwrap()
    }
}

/// Serve `catalog` on a random local port; returns the base URL and a
/// token that shuts the server down when cancelled.
pub async fn start_test_server(catalog: Catalog) -> (String, CancellationToken) {
    start_test_server_with(catalog, ApiConfig::default()).await
}

pub async fn start_test_server_with(
    catalog: Catalog,
    config: ApiConfig,
) -> (String, CancellationToken) {
    let ct = CancellationToken::new();

    let router = RegistryServer::new(config, Arc::new(catalog)).router();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind to random port");
    let addr = listener.local_addr().unwrap();
    let url = format!("http://127.0.0.1:{}", addr.port());

    let ct_clone = ct.clone();
    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move { ct_clone.cancelled().await })
            .await
            .unwrap();
    });

    (url, ct)
}
