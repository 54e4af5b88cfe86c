//! Test: `GET /v0.1/servers` filters and truncation

use pretty_assertions::assert_eq;
use serde_json::Value;
use tests::{fixtures, start_test_server};

async fn list(base: &str, query: &str) -> Value {
    let response = reqwest::get(format!("{}/v0.1/servers{}", base, query))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    response.json().await.unwrap()
}

fn names(body: &Value) -> Vec<String> {
    body["servers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| {
            format!(
                "{}@{}",
                s["server"]["name"].as_str().unwrap(),
                s["server"]["version"].as_str().unwrap()
            )
        })
        .collect()
}

#[tokio::test]
async fn test_default_listing() {
    let (base, ct) = start_test_server(fixtures::catalog()).await;

    let body = list(&base, "").await;
    assert_eq!(body["metadata"]["count"], 4);
    assert_eq!(body["metadata"]["limit"], 30);
    assert!(body["metadata"].get("nextCursor").is_none());
    assert_eq!(
        names(&body),
        vec![
            "io.github.acme/foo-tool@1.0.0",
            "io.github.acme/foo-tool@0.9.0",
            "io.github.weather/forecast@2.1.0",
            "github-mcp-server@0.4.0",
        ]
    );

    ct.cancel();
}

#[tokio::test]
async fn test_limit_truncates_after_counting() {
    let (base, ct) = start_test_server(fixtures::catalog()).await;

    let body = list(&base, "?limit=1").await;
    assert_eq!(names(&body), vec!["io.github.acme/foo-tool@1.0.0"]);
    assert_eq!(body["metadata"]["count"], 4);
    assert_eq!(body["metadata"]["limit"], 1);
    assert_eq!(body["metadata"]["nextCursor"], "io.github.acme/foo-tool");

    let body = list(&base, "?limit=500").await;
    assert_eq!(body["metadata"]["limit"], 100);
    assert_eq!(names(&body).len(), 4);

    let body = list(&base, "?limit=abc").await;
    assert_eq!(body["metadata"]["limit"], 30);

    ct.cancel();
}

#[tokio::test]
async fn test_search_is_case_insensitive_subset() {
    let (base, ct) = start_test_server(fixtures::catalog()).await;

    let all = names(&list(&base, "").await);
    let body = list(&base, "?search=forecasts").await;
    let found = names(&body);

    assert_eq!(found, vec!["io.github.weather/forecast@2.1.0"]);
    assert!(found.iter().all(|n| all.contains(n)));
    assert_eq!(body["metadata"]["count"], 1);

    ct.cancel();
}

#[tokio::test]
async fn test_updated_since() {
    let (base, ct) = start_test_server(fixtures::catalog()).await;

    let body = list(&base, "?updated_since=2025-08-01").await;
    assert_eq!(
        names(&body),
        vec![
            "io.github.acme/foo-tool@1.0.0",
            "io.github.weather/forecast@2.1.0",
        ]
    );

    let body = list(&base, "?updated_since=2025-08-01T00:00:00%2B02:00").await;
    assert_eq!(body["metadata"]["count"], 2);

    // An unreadable threshold filters everything out
    let body = list(&base, "?updated_since=yesterday").await;
    assert_eq!(body["metadata"]["count"], 0);

    ct.cancel();
}

#[tokio::test]
async fn test_version_filter() {
    let (base, ct) = start_test_server(fixtures::catalog()).await;

    let body = list(&base, "?version=latest").await;
    assert_eq!(
        names(&body),
        vec![
            "io.github.acme/foo-tool@1.0.0",
            "io.github.weather/forecast@2.1.0",
            "github-mcp-server@0.4.0",
        ]
    );

    let body = list(&base, "?version=0.9.0").await;
    assert_eq!(names(&body), vec!["io.github.acme/foo-tool@0.9.0"]);

    // Empty parameters are treated as absent
    let body = list(&base, "?version=&search=").await;
    assert_eq!(body["metadata"]["count"], 4);

    ct.cancel();
}
