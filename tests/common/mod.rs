#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use talos::api::modrinth::ModrinthClient;
use talos::models::config::{ModLoader, ResolveConfig};

pub const GAME_VERSION: &str = "1.16.5";

pub fn file_url(server: &MockServer, version_id: &str) -> String {
    format!("{}/cdn/{}.jar", server.uri(), version_id)
}

/// A Modrinth version record compatible with 1.16.5/fabric.
pub fn version_json(server: &MockServer, id: &str, dependencies: &[&str]) -> Value {
    let deps: Vec<Value> = dependencies
        .iter()
        .map(|dep| json!({"version_id": dep, "project_id": null, "dependency_type": "required"}))
        .collect();

    json!({
        "id": id,
        "project_id": format!("project-{}", id),
        "version_number": format!("{}-1.0.0", id),
        "game_versions": [GAME_VERSION],
        "loaders": ["fabric"],
        "files": [{"url": file_url(server, id), "filename": format!("{}.jar", id)}],
        "dependencies": deps,
    })
}

pub fn client_for(server: &MockServer) -> ModrinthClient {
    ModrinthClient::with_base_url(&server.uri()).unwrap()
}

pub fn config_for(server: &MockServer) -> ResolveConfig {
    ResolveConfig::new(server.uri(), GAME_VERSION.to_string(), ModLoader::Fabric)
}

pub async fn mount_version(server: &MockServer, body: Value) {
    let id = body["id"].as_str().unwrap().to_string();
    Mock::given(method("GET"))
        .and(path(format!("/version/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_search(server: &MockServer, query: &str, project_ids: &[&str]) {
    let hits: Vec<Value> = project_ids
        .iter()
        .map(|id| json!({"project_id": id}))
        .collect();

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("query", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": hits,
            "total_hits": project_ids.len(),
        })))
        .mount(server)
        .await;
}

pub async fn mount_project_versions(server: &MockServer, project_id: &str, versions: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/project/{}/version", project_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(versions))
        .mount(server)
        .await;
}

pub async fn mount_file(server: &MockServer, version_id: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/cdn/{}.jar", version_id)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}
