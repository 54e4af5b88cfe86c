//! Test: name resolution and version lookups

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tests::{fixtures, start_test_server};

async fn get(base: &str, path: &str) -> (u16, Value) {
    let response = reqwest::get(format!("{}{}", base, path)).await.unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_api_info() {
    let (base, ct) = start_test_server(fixtures::catalog()).await;

    let (status, body) = get(&base, "/").await;
    assert_eq!(status, 200);
    assert_eq!(body["name"], "MCP Registry Demo");
    assert_eq!(body["version"], "v0.1");
    assert_eq!(body["endpoints"]["servers"], "/v0.1/servers");

    let (status, body) = get(&base, "/health").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"status": "ok"}));

    ct.cancel();
}

#[tokio::test]
async fn test_latest_and_specific_versions() {
    let (base, ct) = start_test_server(fixtures::catalog()).await;

    let (status, latest) = get(&base, "/v0.1/servers/foo-tool/versions/latest").await;
    assert_eq!(status, 200);
    assert_eq!(latest["server"]["name"], "io.github.acme/foo-tool");
    assert_eq!(latest["server"]["version"], "1.0.0");
    assert_eq!(
        latest["_meta"]["io.modelcontextprotocol.registry/official"]["isLatest"],
        true
    );

    let (status, older) = get(&base, "/v0.1/servers/foo-tool/versions/0.9.0").await;
    assert_eq!(status, 200);
    assert_eq!(older["server"]["version"], "0.9.0");

    let (status, missing) = get(&base, "/v0.1/servers/foo-tool/versions/9.9.9").await;
    assert_eq!(status, 404);
    assert_eq!(
        missing,
        json!({
            "error": "Server not found",
            "message": "No server found with name: foo-tool and version: 9.9.9"
        })
    );

    ct.cancel();
}

#[tokio::test]
async fn test_latest_via_version_path_matches_latest_endpoint() {
    let (base, ct) = start_test_server(fixtures::catalog()).await;

    let via_version = reqwest::get(format!("{}/v0.1/servers/foo-tool/versions/latest", base))
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    let via_encoded = reqwest::get(format!("{}/v0.1/servers/foo-tool/versions/%6Catest", base))
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    assert_eq!(via_version, via_encoded);

    ct.cancel();
}

#[tokio::test]
async fn test_name_encodings_resolve_to_same_record() {
    let (base, ct) = start_test_server(fixtures::catalog()).await;

    for token in [
        "io.github.acme%2Ffoo-tool",
        "io-github-acme-foo-tool",
        "foo-tool",
        "acme%2Ffoo",
    ] {
        let (status, body) = get(&base, &format!("/v0.1/servers/{}/versions/latest", token)).await;
        assert_eq!(status, 200, "token {}", token);
        assert_eq!(body["server"]["name"], "io.github.acme/foo-tool", "token {}", token);
    }

    ct.cancel();
}

#[tokio::test]
async fn test_versions_listing() {
    let (base, ct) = start_test_server(fixtures::catalog()).await;

    let (status, body) = get(&base, "/v0.1/servers/foo-tool/versions").await;
    assert_eq!(status, 200);
    assert_eq!(body["metadata"], json!({"count": 2}));
    let versions: Vec<&str> = body["servers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["server"]["version"].as_str().unwrap())
        .collect();
    assert_eq!(versions, vec!["1.0.0", "0.9.0"]);

    ct.cancel();
}

#[tokio::test]
async fn test_legacy_record_is_served_in_envelope_shape() {
    let (base, ct) = start_test_server(fixtures::catalog()).await;

    let (status, body) = get(&base, "/v0.1/servers/github-mcp-server/versions/0.4.0").await;
    assert_eq!(status, 200);
    assert_eq!(body["server"]["name"], "github-mcp-server");
    assert_eq!(body["server"]["packages"][0]["registryType"], "docker");
    assert_eq!(
        body["_meta"]["io.modelcontextprotocol.registry/official"]["updatedAt"],
        "2025-07-01T00:00:00Z"
    );

    ct.cancel();
}

#[tokio::test]
async fn test_unknown_name() {
    let (base, ct) = start_test_server(fixtures::catalog()).await;

    for path in [
        "/v0.1/servers/non-existent-server/versions",
        "/v0.1/servers/non-existent-server/versions/latest",
        "/v0.1/servers/non-existent-server/versions/1.0.0",
    ] {
        let (status, body) = get(&base, path).await;
        assert_eq!(status, 404, "{}", path);
        assert_eq!(body["error"], "Server not found", "{}", path);
    }

    ct.cancel();
}
