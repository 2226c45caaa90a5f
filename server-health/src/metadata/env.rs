//! プロセス環境のスナップショット

use crate::common::types::EnvInfo;
use crate::config::get_env_with_fallback;

/// ビルド時に取得したrustcバージョン
pub const RUNTIME_VERSION: &str = env!("SERVER_HEALTH_RUSTC_VERSION");

/// 現在のプロセスの環境情報を取得する
///
/// 実行環境名は `SERVER_HEALTH_ENV`（旧: `NODE_ENV`）から読む。
pub fn capture() -> EnvInfo {
    EnvInfo {
        node_env: get_env_with_fallback("SERVER_HEALTH_ENV", "NODE_ENV"),
        node_version: RUNTIME_VERSION.to_string(),
        process_name: process_name(),
        pid: std::process::id(),
        cwd: std::env::current_dir()
            .map(|dir| dir.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

fn process_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .or_else(|| std::env::args().next())
        .unwrap_or_default()
}
