//! Integration Test: 実ポートで起動したサーバーへの到達確認
//!
//! 組み込みのHTTPプローブと`check`サブコマンドのクライアントを実サーバーに向ける。

use server_health::cli::check::{self, CheckArgs};
use server_health::health::{HttpCheck, TcpCheck};
use serde_json::json;

use crate::support::app::create_test_app;
use crate::support::http::spawn_app;

/// 別インスタンスの/healthをHTTPプローブで監視できること
#[tokio::test]
async fn http_probe_against_live_health_endpoint() {
    let (upstream_app, upstream) = create_test_app();
    let upstream_server = spawn_app(upstream_app).await;

    let (app, service) = create_test_app();
    service
        .registry()
        .add_check(
            "upstream",
            HttpCheck::with_default_client(upstream_server.url("/health")).unwrap(),
        )
        .await;
    service
        .registry()
        .add_check("upstreamTcp", TcpCheck::new(upstream_server.addr().to_string()))
        .await;
    let server = spawn_app(app).await;

    let args = CheckArgs {
        url: server.url("/health"),
        filter: Some("status,connections".to_string()),
        timeout_secs: 5,
    };

    let outcome = check::fetch(&args).await.unwrap();
    assert!(outcome.is_healthy());
    assert_eq!(
        outcome.body,
        json!({
            "status": "ok",
            "connections": { "upstream": "ok", "upstreamTcp": "ok" }
        })
    );

    // 上流が不健康になれば下流も失敗する
    upstream.registry().add_fn("database", || false).await;
    let outcome = check::fetch(&args).await.unwrap();
    assert!(!outcome.is_healthy());
    assert_eq!(outcome.body["status"], "fail:upstream");

    server.stop().await;
    upstream_server.stop().await;
}
