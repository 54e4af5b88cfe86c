//! Test: exported files are byte-identical to live responses

use mcpreg_static::{export, url_path_for, ExportConfig, ExportReport};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tests::{fixtures, start_test_server};

fn export_to(dir: &Path, assets: Option<&Path>) -> ExportReport {
    export(
        &fixtures::catalog(),
        ExportConfig {
            output_dir: dir.to_path_buf(),
            assets_dir: assets.map(|p| p.to_path_buf()),
        },
    )
    .unwrap()
}

#[tokio::test]
async fn test_every_document_matches_live_response() {
    let out = tempfile::tempdir().unwrap();
    let report = export_to(out.path(), None);
    let (base, ct) = start_test_server(fixtures::catalog()).await;

    let mut compared = 0;
    for relative in &report.files {
        let Some(path) = url_path_for(relative) else {
            continue;
        };

        let response = reqwest::get(format!("{}{}", base, path)).await.unwrap();
        assert_eq!(response.status().as_u16(), 200, "{}", path);
        let live = response.bytes().await.unwrap();
        let written = fs::read(out.path().join(relative)).unwrap();

        assert_eq!(
            String::from_utf8_lossy(&written),
            String::from_utf8_lossy(&live),
            "{}",
            path
        );
        compared += 1;
    }

    // root, list, three names with versions and latest, four version documents
    assert_eq!(compared, 1 + 1 + 3 * 2 + 4);

    ct.cancel();
}

#[test]
fn test_export_writes_expected_tree() {
    let out = tempfile::tempdir().unwrap();
    export_to(out.path(), None);

    for expected in [
        "index.json",
        "v0.1/servers/index.json",
        "v0.1/servers/foo-tool/versions/index.json",
        "v0.1/servers/foo-tool/versions/latest/index.json",
        "v0.1/servers/foo-tool/versions/0.9.0/index.json",
        "v0.1/servers/forecast/versions/2.1.0/index.json",
        "v0.1/servers/github-mcp-server/versions/latest/index.json",
        "registry.json",
    ] {
        assert!(out.path().join(expected).is_file(), "missing {}", expected);
    }
}

#[test]
fn test_legacy_registry_document() {
    let out = tempfile::tempdir().unwrap();
    export_to(out.path(), None);

    let legacy: Value =
        serde_json::from_slice(&fs::read(out.path().join("registry.json")).unwrap()).unwrap();
    let servers = legacy["servers"].as_array().unwrap();
    assert_eq!(servers.len(), 4);

    let github = &servers[3];
    assert_eq!(github["server"]["name"], "github-mcp-server");
    assert_eq!(
        github["server"]["repository"]["url"],
        "https://github.com/github/github-mcp-server"
    );
    assert!(github["server"]["$schema"]
        .as_str()
        .unwrap()
        .starts_with("https://"));
    assert_eq!(
        github["_meta"]["io.modelcontextprotocol.registry/official"]["publishedAt"],
        "2025-07-01T00:00:00Z"
    );
}

#[test]
fn test_passthrough_assets_are_copied() {
    let assets = tempfile::tempdir().unwrap();
    fs::write(
        assets.path().join("index.html"),
        "<!doctype html><title>registry</title>",
    )
    .unwrap();
    fs::write(assets.path().join(".nojekyll"), "").unwrap();
    let out = tempfile::tempdir().unwrap();

    export_to(out.path(), Some(assets.path()));

    assert_eq!(
        fs::read_to_string(out.path().join("index.html")).unwrap(),
        "<!doctype html><title>registry</title>"
    );
    assert!(out.path().join(".nojekyll").is_file());
}
