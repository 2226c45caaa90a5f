//! Integration Test: GET /ping

use axum::http::StatusCode;
use serde_json::json;

use crate::support::app::{create_test_app, get_json};

/// pingは縮小版のドキュメントを返すこと
#[tokio::test]
async fn ping_returns_reduced_document() {
    let (app, service) = create_test_app();
    service.registry().add_fn("database", || true).await;

    let (status, json) = get_json(&app, "/ping").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["version"], "1.2.3");
    assert_eq!(json["connections"], json!({ "database": "ok" }));
    assert_eq!(
        json["env"],
        json!({
            "nodeEnv": "test",
            "nodeVersion": "v1.80.0",
            "processName": "server-health-test",
            "pid": 4242
        })
    );
    assert!(json.get("uptime").is_some());
    assert!(json.get("upSince").is_some());
    for key in ["status", "git", "service", "localTime"] {
        assert!(json.get(key).is_none(), "unexpected '{key}' in {json}");
    }
}

/// 失敗したコネクションがあれば500になること
#[tokio::test]
async fn ping_with_failing_probe() {
    let (app, service) = create_test_app();
    service.registry().add_fn("database", || false).await;

    let (status, json) = get_json(&app, "/ping").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["connections"]["database"], "fail");
}

/// pingはフィルタを解釈しないこと
#[tokio::test]
async fn ping_ignores_filter() {
    let (app, _service) = create_test_app();

    let (status, json) = get_json(&app, "/ping?filter=foo").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json.get("version").is_some());
}
