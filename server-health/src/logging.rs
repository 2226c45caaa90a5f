//! ロギング初期化ユーティリティ
//!
//! `tracing-subscriber`のfmtレイヤーを標準エラー出力に設定する。
//! ログレベルは`SERVER_HEALTH_LOG_LEVEL`（なければ`RUST_LOG`）から読む。

use crate::config::get_env_with_fallback;
use tracing_subscriber::EnvFilter;

/// デフォルトのログレベル
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// ログレベル指定から[`EnvFilter`]を組み立てる
///
/// 解釈できない指定はデフォルトレベルに落とす。
pub fn build_filter(directive: Option<&str>) -> EnvFilter {
    let directive = directive
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_LOG_LEVEL);
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// グローバルサブスクライバーを初期化する
///
/// 二重初期化はエラーとして返す。
pub fn init() -> anyhow::Result<()> {
    let directive = get_env_with_fallback("SERVER_HEALTH_LOG_LEVEL", "RUST_LOG");
    let filter = build_filter(directive.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))
}
