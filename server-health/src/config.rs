//! 環境変数による設定管理
//!
//! 旧名へのフォールバック（警告ログ付き）に対応した環境変数ヘルパーと、
//! それを使うヘルスエンドポイント設定を提供する。

use std::time::Duration;

/// デフォルトのヘルスチェックパス
pub const DEFAULT_HEALTH_PATH: &str = "/health";

/// デフォルトのpingパス
pub const DEFAULT_PING_PATH: &str = "/ping";

/// 旧名へのフォールバック付きで環境変数を取得する
///
/// 新しい名前が設定されていればその値を返す。
/// 旧名だけが設定されている場合は値を返し、警告ログを出す。
///
/// # Example
/// ```
/// use server_health::config::get_env_with_fallback;
///
/// let env_name = get_env_with_fallback("SERVER_HEALTH_ENV", "NODE_ENV");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is a legacy name, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// フォールバック付きで環境変数を取得し、未設定ならデフォルト値を返す
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// フォールバック付きで環境変数を取得し、指定の型にパースする
///
/// どちらも未設定、またはパースに失敗した場合は`default`を返す。
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// ヘルスエンドポイント設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthConfig {
    /// ヘルスチェックのパス（デフォルト: `/health`）
    pub health_path: String,
    /// pingのパス（デフォルト: `/ping`）
    pub ping_path: String,
    /// プローブ1件あたりのタイムアウト（未設定ならタイムアウトなし）
    pub probe_timeout: Option<Duration>,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            health_path: DEFAULT_HEALTH_PATH.to_string(),
            ping_path: DEFAULT_PING_PATH.to_string(),
            probe_timeout: None,
        }
    }
}

impl HealthConfig {
    /// 環境変数からヘルスエンドポイント設定を読み込む
    ///
    /// - `SERVER_HEALTH_PATH`（旧: `HEALTH_ENDPOINT`）
    /// - `SERVER_HEALTH_PING_PATH`（旧: `PING_ENDPOINT`）
    /// - `SERVER_HEALTH_PROBE_TIMEOUT_MS`（旧: `HEALTH_PROBE_TIMEOUT_MS`）、`0`は無効
    ///
    /// 2つのパスが同じ場合はエラーを返す。
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Self::read_env();
        config.validate()?;
        Ok(config)
    }

    /// 検証なしで環境変数を読む（CLI引数で上書きしてから検証する場合用）
    pub(crate) fn read_env() -> Self {
        let health_path = normalize_path(&get_env_with_fallback_or(
            "SERVER_HEALTH_PATH",
            "HEALTH_ENDPOINT",
            DEFAULT_HEALTH_PATH,
        ));
        let ping_path = normalize_path(&get_env_with_fallback_or(
            "SERVER_HEALTH_PING_PATH",
            "PING_ENDPOINT",
            DEFAULT_PING_PATH,
        ));
        let probe_timeout = get_env_with_fallback_parse(
            "SERVER_HEALTH_PROBE_TIMEOUT_MS",
            "HEALTH_PROBE_TIMEOUT_MS",
            0u64,
        );

        Self {
            health_path,
            ping_path,
            probe_timeout: (probe_timeout > 0).then(|| Duration::from_millis(probe_timeout)),
        }
    }

    /// ルートとして登録できる組み合わせか確認する
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.health_path == self.ping_path {
            anyhow::bail!(
                "health and ping paths must differ (both are '{}')",
                self.health_path
            );
        }
        Ok(())
    }
}

/// ルートパスとして使えるよう先頭に`/`を付ける
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
