//! RemoteClient behavior against a live in-process HTTP backend and against
//! dead or misbehaving endpoints. Every call must resolve with a sentinel,
//! never an error.

use axum::http::StatusCode;
use axum::{routing::get, routing::post, Json, Router};
use pulsetop::api::RemoteClient;
use pulsetop::types::{ServiceState, SystemStatus};
use serde_json::json;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Bind then drop: the port was free a moment ago, so connects get refused.
async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn system_status_parses_payload() {
    let app = Router::new().route(
        "/api/system",
        get(|| async { Json(json!({"status": "active", "lastSync": "2026-08-24 10:00:00"})) }),
    );
    let base = serve(app).await;
    let status = RemoteClient::new(&base).system_status().await;
    assert_eq!(status.status, ServiceState::Active);
    assert_eq!(status.last_sync, "2026-08-24 10:00:00");
}

#[tokio::test]
async fn system_status_unrecognized_state_maps_to_unknown() {
    let app = Router::new().route(
        "/api/system",
        get(|| async { Json(json!({"status": "degraded"})) }),
    );
    let base = serve(app).await;
    let status = RemoteClient::new(&base).system_status().await;
    assert_eq!(status.status, ServiceState::Unknown);
    assert_eq!(status.last_sync, "Never");
}

#[tokio::test]
async fn system_status_is_offline_sentinel_when_unreachable() {
    let base = dead_base_url().await;
    let status = RemoteClient::new(&base).system_status().await;
    assert_eq!(status, SystemStatus::offline());
}

#[tokio::test]
async fn system_status_is_offline_sentinel_on_bad_json() {
    let app = Router::new().route("/api/system", get(|| async { "not json at all" }));
    let base = serve(app).await;
    let status = RemoteClient::new(&base).system_status().await;
    assert_eq!(status, SystemStatus::offline());
}

#[tokio::test]
async fn system_status_is_offline_sentinel_on_http_error() {
    let app = Router::new().route(
        "/api/system",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = serve(app).await;
    let status = RemoteClient::new(&base).system_status().await;
    assert_eq!(status, SystemStatus::offline());
}

#[tokio::test]
async fn activities_preserve_server_order() {
    let app = Router::new().route(
        "/api/activities",
        get(|| async {
            Json(json!([
                {"id": "ingest", "progress": 40.0, "time": "2 min ago"},
                {"id": "publish", "progress": 90.0, "time": "just now"},
            ]))
        }),
    );
    let base = serve(app).await;
    let list = RemoteClient::new(&base).activities().await;
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, "ingest");
    assert_eq!(list[1].id, "publish");
}

#[tokio::test]
async fn activities_empty_when_unreachable() {
    let base = dead_base_url().await;
    let list = RemoteClient::new(&base).activities().await;
    assert!(list.is_empty());
}

#[tokio::test]
async fn activities_empty_on_bad_payload() {
    let app = Router::new().route(
        "/api/activities",
        get(|| async { Json(json!({"unexpected": "shape"})) }),
    );
    let base = serve(app).await;
    let list = RemoteClient::new(&base).activities().await;
    assert!(list.is_empty());
}

#[tokio::test]
async fn sync_now_reports_server_outcome() {
    let app = Router::new().route(
        "/api/sync",
        post(|| async { Json(json!({"success": true})) }),
    );
    let base = serve(app).await;
    let outcome = RemoteClient::new(&base).sync_now().await;
    assert!(outcome.success);
    assert!(outcome.error.is_none());
}

#[tokio::test]
async fn sync_now_failure_carries_a_message() {
    let base = dead_base_url().await;
    let outcome = RemoteClient::new(&base).sync_now().await;
    assert!(!outcome.success);
    assert!(outcome.error.is_some());
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_tolerated() {
    let app = Router::new().route(
        "/api/system",
        get(|| async { Json(json!({"status": "active"})) }),
    );
    let base = format!("{}/", serve(app).await);
    let client = RemoteClient::new(&base);
    assert!(!client.base_url().ends_with('/'));
    let status = client.system_status().await;
    assert_eq!(status.status, ServiceState::Active);
}
