//! HTTP handlers for the registry API

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::Uri,
    response::{IntoResponse, Json, Response},
};
use mcpreg_core::branding::api_path;
use mcpreg_core::{api_info, ApiInfo, ListQuery};
use serde::Serialize;
use tracing::debug;

use super::{ApiError, AppState};

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// `GET /` - registry name, API version and endpoint templates
pub async fn root() -> Json<ApiInfo> {
    Json(api_info())
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    debug!("[Api] Health check");
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// `GET /v0.1/servers`
///
/// The query is read as ordered pairs so repeated keys resolve to their
/// first value instead of failing extraction.
pub async fn list_servers(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let pairs = pairs.map(|Query(pairs)| pairs).unwrap_or_else(|rejection| {
        debug!("[Api] Unreadable query string, listing unfiltered: {}", rejection);
        Vec::new()
    });
    let query = ListQuery::from_pairs(pairs);

    let list = state.catalog.list(&query);
    debug!(
        "[Api] List: {} of {} servers (search={:?}, version={:?}, updated_since={:?})",
        list.servers.len(),
        list.metadata.count,
        query.search,
        query.version,
        query.updated_since
    );
    Json(list).into_response()
}

/// `GET /v0.1/servers/{name}/versions`
pub async fn list_versions(
    State(state): State<AppState>,
    uri: Uri,
    name: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let name = name
        .map(|Path(name)| name)
        .unwrap_or_else(|rejection| raw_params(&uri, &rejection).0);
    let list = state.catalog.versions(&name)?;
    debug!("[Api] Versions of {}: {}", name, list.metadata.count);
    Ok(Json(list).into_response())
}

/// `GET /v0.1/servers/{name}/versions/latest`
pub async fn latest_version(
    State(state): State<AppState>,
    uri: Uri,
    name: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let name = name
        .map(|Path(name)| name)
        .unwrap_or_else(|rejection| raw_params(&uri, &rejection).0);
    let entry = state.catalog.latest(&name)?;
    debug!("[Api] Latest of {}: {}", name, entry.version());
    Ok(Json(entry).into_response())
}

/// `GET /v0.1/servers/{name}/versions/{version}`
///
/// `latest` in the version position is answered by the latest lookup.
pub async fn specific_version(
    State(state): State<AppState>,
    uri: Uri,
    params: Result<Path<(String, String)>, PathRejection>,
) -> Result<Response, ApiError> {
    let (name, version) = match params {
        Ok(Path(params)) => params,
        Err(rejection) => {
            let (name, version) = raw_params(&uri, &rejection);
            (name, version.unwrap_or_default())
        }
    };
    let entry = state.catalog.version(&name, &version)?;
    debug!("[Api] {}@{} -> {}", name, version, entry.name());
    Ok(Json(entry).into_response())
}

/// `{name}` and `{version}` exactly as sent, still percent-encoded
///
/// axum refuses segments that do not decode to UTF-8. The catalog keeps such
/// tokens as they are, so they reach it undecoded and resolve to nothing.
fn raw_params(uri: &Uri, rejection: &PathRejection) -> (String, Option<String>) {
    debug!("[Api] Undecodable path {}: {}", uri.path(), rejection);
    let prefix = api_path("/servers/");
    let mut segments = uri
        .path()
        .strip_prefix(prefix.as_str())
        .unwrap_or_default()
        .split('/');
    let name = segments.next().unwrap_or_default().to_string();
    let version = segments.nth(1).map(str::to_string);
    (name, version)
}

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> ApiError {
    debug!("[Api] No route for {}", uri.path());
    ApiError::RouteNotFound {
        path: uri.path().to_string(),
    }
}
