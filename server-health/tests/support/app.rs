use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use server_health::common::types::{EnvInfo, GitInfo, ServiceInfo};
use server_health::config::HealthConfig;
use server_health::health::HealthService;
use server_health::metadata::ServiceMetadata;
use server_health::registry::ProbeRegistry;
use tower::ServiceExt;

/// テスト用の固定メタデータ
pub fn test_metadata() -> ServiceMetadata {
    ServiceMetadata::from_parts(
        ServiceInfo::new("test-service", "Service under test", "1.2.3"),
        GitInfo {
            commit_hash: Some("0123456789abcdef0123456789abcdef01234567".to_string()),
            branch_name: Some("main".to_string()),
            tag: None,
        },
        EnvInfo {
            node_env: Some("test".to_string()),
            node_version: "v1.80.0".to_string(),
            process_name: "server-health-test".to_string(),
            pid: 4242,
            cwd: "/srv/app".to_string(),
        },
    )
}

/// 空のレジストリを持つサービスとルーターを作成
pub fn create_test_app() -> (Router, HealthService) {
    let service = HealthService::new(ProbeRegistry::new(), test_metadata());
    let app = server_health::api::create_app(service.clone(), &HealthConfig::default());
    (app, service)
}

/// GETしてステータスとJSONボディを返す
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}
