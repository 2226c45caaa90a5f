//! Integration Test: GET /health
//!
//! 登録済みプローブの集約結果とHTTPステータスを検証する。

use axum::http::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;

use crate::support::app::{create_test_app, get_json};

/// プローブなしでも200と全トップレベルプロパティを返すこと
#[tokio::test]
async fn health_without_probes_returns_ok() {
    let (app, _service) = create_test_app();

    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["connections"], json!({}));
    for key in [
        "status",
        "uptime",
        "upSince",
        "localTime",
        "service",
        "connections",
        "env",
        "git",
    ] {
        assert!(json.get(key).is_some(), "missing '{key}' in {json}");
    }
}

/// サービス・環境・gitの記述子がそのまま出力されること
#[tokio::test]
async fn health_reports_metadata() {
    let (app, _service) = create_test_app();

    let (_, json) = get_json(&app, "/health").await;

    assert_eq!(
        json["service"],
        json!({
            "name": "test-service",
            "description": "Service under test",
            "version": "1.2.3"
        })
    );
    assert_eq!(json["env"]["nodeEnv"], "test");
    assert_eq!(json["env"]["nodeVersion"], "v1.80.0");
    assert_eq!(json["env"]["processName"], "server-health-test");
    assert_eq!(json["env"]["pid"], 4242);
    assert_eq!(json["env"]["cwd"], "/srv/app");
    assert_eq!(json["git"]["branchName"], "main");
    assert_eq!(json["git"]["tag"], Value::Null);
    assert!(json["uptime"].as_f64().unwrap() >= 0.0);
    assert!(json["upSince"].is_string());
    assert!(json["localTime"].is_string());
}

/// 全プローブが成功すれば200で各コネクションが"ok"になること
#[tokio::test]
async fn health_with_passing_probes() {
    let (app, service) = create_test_app();
    service.registry().add_fn("passingConnectionTest", || true).await;
    service
        .registry()
        .add_async_fn("asyncConnectionTest", || async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            true
        })
        .await;

    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(
        json["connections"],
        json!({ "passingConnectionTest": "ok", "asyncConnectionTest": "ok" })
    );
}

/// falseを返すプローブがあれば500でステータスに名前が入ること
#[tokio::test]
async fn health_with_failing_probe() {
    let (app, service) = create_test_app();
    service.registry().add_fn("passingConnectionTest", || true).await;
    service
        .registry()
        .add_fn("failingConnectionTest", || false)
        .await;

    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["status"], "fail:failingConnectionTest");
    assert_eq!(json["connections"]["passingConnectionTest"], "ok");
    assert_eq!(json["connections"]["failingConnectionTest"], "fail");
}

/// エラーを返すプローブは失敗として扱われ、他のプローブに影響しないこと
#[tokio::test]
async fn health_with_erroring_probe() {
    let (app, service) = create_test_app();
    service
        .registry()
        .add_fn("erroringConnectionTest", || -> Result<bool, std::io::Error> {
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))
        })
        .await;
    service.registry().add_fn("passingConnectionTest", || true).await;

    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["status"], "fail:erroringConnectionTest");
    assert_eq!(json["connections"]["passingConnectionTest"], "ok");
}

/// 複数の失敗は登録順にカンマ区切りで並ぶこと
#[tokio::test]
async fn health_lists_failures_in_registration_order() {
    let (app, service) = create_test_app();
    service.registry().add_fn("queue", || false).await;
    service.registry().add_fn("cache", || true).await;
    service.registry().add_fn("database", || false).await;

    let (_, json) = get_json(&app, "/health").await;

    assert_eq!(json["status"], "fail:queue,database");
}

/// 真偽値以外を返すプローブは500のInternalエラーになること
#[tokio::test]
async fn health_with_non_boolean_probe() {
    let (app, service) = create_test_app();
    service.registry().add_fn("passingConnectionTest", || true).await;
    service
        .registry()
        .add_fn("invalidHealthCheck", || "invalid response")
        .await;

    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json,
        json!({
            "code": "Internal",
            "message": "connection check for invalidHealthCheck must return boolean, got string"
        })
    );
}

/// リセット後は空のレジストリとして扱われること
#[tokio::test]
async fn health_after_reset() {
    let (app, service) = create_test_app();
    service
        .registry()
        .add_fn("failingConnectionTest", || false)
        .await;

    let (status, _) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    service.registry().reset().await;

    let (status, json) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["connections"], json!({}));
}

/// 同名のプローブは後から登録したものが有効になること
#[tokio::test]
async fn health_duplicate_name_last_wins() {
    let (app, service) = create_test_app();
    service.registry().add_fn("database", || false).await;
    service.registry().add_fn("database", || true).await;

    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["connections"], json!({ "database": "ok" }));
}
