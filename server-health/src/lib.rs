//! server-health
//!
//! 依存先への接続チェックを集約して`/health`と`/ping`を提供するライブラリ
//!
//! ```no_run
//! use server_health::config::HealthConfig;
//! use server_health::health::HealthService;
//! use server_health::metadata::ServiceMetadata;
//! use server_health::registry::ProbeRegistry;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let registry = ProbeRegistry::new();
//! registry.add_fn("database", || true).await;
//!
//! let metadata = ServiceMetadata::collect(server_health::service_info!());
//! let service = HealthService::new(registry, metadata);
//! let app = server_health::api::health_routes(service, &HealthConfig::default());
//! # let _ = app;
//! # }
//! ```

#![warn(missing_docs)]

/// 共通型定義とエラー
pub mod common;

/// REST APIハンドラー
pub mod api;

/// ヘルスチェック（実行・集約・フィルタ）
pub mod health;

/// 接続チェックの登録管理
pub mod registry;

/// サービスメタデータ（プロセス環境・git情報）
pub mod metadata;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// CLIインターフェース
pub mod cli;

/// axumサーバー起動
pub mod server;

/// 協調シャットダウン
pub mod shutdown;
