//! Root API info document (`GET /` and the exported `index.json`).

use serde::Serialize;

use crate::branding;

#[derive(Debug, Clone, Serialize)]
pub struct ApiInfo {
    pub name: String,
    pub version: String,
    pub endpoints: ApiEndpoints,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndpoints {
    pub servers: String,
    pub versions: String,
    pub latest_version: String,
    pub specific_version: String,
}

pub fn api_info() -> ApiInfo {
    ApiInfo {
        name: branding::DISPLAY_NAME.to_string(),
        version: branding::API_VERSION.to_string(),
        endpoints: ApiEndpoints {
            servers: branding::api_path("/servers"),
            versions: branding::api_path("/servers/:serverName/versions"),
            latest_version: branding::api_path("/servers/:serverName/versions/latest"),
            specific_version: branding::api_path("/servers/:serverName/versions/:version"),
        },
    }
}
