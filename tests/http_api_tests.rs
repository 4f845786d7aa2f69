#![cfg(feature = "http_api")]

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::path::Path;
use tempfile::tempdir;
use tower::util::ServiceExt;
use workforce_plan::{AggregatedPlan, LaborCategory, http_api};

fn router_exporting_to(dir: &Path) -> axum::Router {
    http_api::router(http_api::AppState::new(dir))
}

fn new_router() -> axum::Router {
    router_exporting_to(Path::new("exports"))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn drainage_request() -> Value {
    json!({
        "metadata": { "title": "HTTP Demo", "conversion_factor": 1.0 },
        "projects": [{
            "project_type": "roadbed",
            "modules": [{
                "name": "路基防排水阶段",
                "start": "2025-01",
                "end": "2025-03",
                "team_count": 2
            }]
        }]
    })
}

#[tokio::test]
async fn health_and_project_types() {
    let app = new_router();
    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/project-types")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let types = json_body(response).await;
    let types = types.as_array().unwrap();
    assert_eq!(types.len(), 5);
    assert_eq!(types[3]["project_type"], "tunnel");
    assert_eq!(types[3]["supports_winter_break"], false);
    assert_eq!(types[3]["categories"].as_array().unwrap().len(), 11);
}

#[tokio::test]
async fn plan_lifecycle_via_http_api() {
    let dir = tempdir().unwrap();
    let app = router_exporting_to(dir.path());

    let response = app.clone().oneshot(get("/plans/latest")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(post_json("/plans", drainage_request()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let plan: AggregatedPlan = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(plan.series(LaborCategory::Electrician), Some(&[4, 6, 10][..]));

    let response = app.clone().oneshot(get("/plans/latest")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_json(
            "/plans/latest/export",
            json!({ "format": "csv", "path": "missing/plan.csv" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["error"], "internal_error");

    let response = app
        .oneshot(post_json(
            "/plans/latest/export",
            json!({ "format": "json", "path": "plan.json" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let summary = json_body(response).await;
    assert_eq!(summary["months"], 3);
    let written = dir.path().join("plan.json");
    assert_eq!(summary["path"], json!(written));
    assert!(written.exists());
}

#[tokio::test]
async fn invalid_request_is_bad_request() {
    let app = new_router();
    let mut request = drainage_request();
    request["projects"][0]["modules"][0]["start"] = json!("2025-06");
    let response = app.oneshot(post_json("/plans", request)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "invalid_request");
    assert!(body["message"].as_str().unwrap().contains("路基防排水阶段"));
}

#[tokio::test]
async fn empty_request_is_unprocessable() {
    let app = new_router();
    let response = app
        .oneshot(post_json("/plans", json!({ "projects": [] })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["error"], "nothing_to_generate");
}

#[tokio::test]
async fn export_stays_inside_export_directory() {
    let root = tempdir().unwrap();
    let export_dir = root.path().join("exports");
    std::fs::create_dir(&export_dir).unwrap();
    let app = router_exporting_to(&export_dir);

    let response = app
        .clone()
        .oneshot(post_json("/plans", drainage_request()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let outside = root.path().join("outside.csv");
    for path in [json!("../outside.csv"), json!(outside), json!("")] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/plans/latest/export",
                json!({ "format": "csv", "path": path }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(json_body(response).await["error"], "invalid_request");
    }
    assert!(!outside.exists());

    let response = app
        .oneshot(post_json(
            "/plans/latest/export",
            json!({ "format": "csv", "path": "plan.csv" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(export_dir.join("plan.csv").exists());
}
