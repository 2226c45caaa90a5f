//! REST APIハンドラー
//!
//! [`HealthService`]をaxumのルーターとして公開する。

pub mod error;
pub mod health;

use crate::config::HealthConfig;
use crate::health::HealthService;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// ヘルスチェックとpingのルートだけを持つルーター
///
/// 既存のaxumアプリへ`merge`して組み込む用途を想定している。
/// 2つのパスは[`HealthConfig::validate`]で事前に確認しておくこと。
pub fn health_routes(service: HealthService, config: &HealthConfig) -> Router {
    Router::new()
        .route(&config.health_path, get(health::get_health))
        .route(&config.ping_path, get(health::get_ping))
        .with_state(service)
}

/// スタンドアロンサーバー用のアプリケーションを作成
pub fn create_app(service: HealthService, config: &HealthConfig) -> Router {
    health_routes(service, config).layer(TraceLayer::new_for_http())
}
