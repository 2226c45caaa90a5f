//! serve サブコマンド
//!
//! ヘルスチェックサーバーを起動します。

use crate::api;
use crate::config::{
    get_env_with_fallback_or, get_env_with_fallback_parse, normalize_path, HealthConfig,
};
use crate::health::{HealthService, HttpCheck, TcpCheck};
use crate::metadata::ServiceMetadata;
use crate::registry::{ProbeRegistry, RegisterStatus};
use crate::server;
use crate::shutdown::ShutdownController;
use clap::Args;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// デフォルトのバインドアドレス
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// デフォルトのポート
pub const DEFAULT_PORT: u16 = 8080;

/// `name=target`形式のプローブ指定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeArg {
    /// コネクション名
    pub name: String,
    /// URLまたは`host:port`
    pub target: String,
}

impl FromStr for ProbeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, target) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=TARGET, got '{}'", s))?;
        let name = name.trim();
        let target = target.trim();
        if name.is_empty() {
            return Err("probe name must not be empty".to_string());
        }
        if target.is_empty() {
            return Err(format!("probe '{}' has an empty target", name));
        }
        Ok(Self {
            name: name.to_string(),
            target: target.to_string(),
        })
    }
}

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "SERVER_HEALTH_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = DEFAULT_HOST, env = "SERVER_HEALTH_HOST")]
    pub host: String,

    /// Health route (overrides SERVER_HEALTH_PATH)
    #[arg(long)]
    pub health_path: Option<String>,

    /// Ping route (overrides SERVER_HEALTH_PING_PATH)
    #[arg(long)]
    pub ping_path: Option<String>,

    /// Per-probe timeout in milliseconds (overrides SERVER_HEALTH_PROBE_TIMEOUT_MS)
    #[arg(long)]
    pub probe_timeout_ms: Option<u64>,

    /// HTTP probe as NAME=URL (repeatable)
    #[arg(long = "http-probe", value_name = "NAME=URL")]
    pub http_probes: Vec<ProbeArg>,

    /// TCP probe as NAME=HOST:PORT (repeatable)
    #[arg(long = "tcp-probe", value_name = "NAME=HOST:PORT")]
    pub tcp_probes: Vec<ProbeArg>,
}

impl ServeArgs {
    /// サブコマンドなしで起動した場合の設定（環境変数のみ）
    pub fn from_env() -> Self {
        Self {
            port: get_env_with_fallback_parse("SERVER_HEALTH_PORT", "PORT", DEFAULT_PORT),
            host: get_env_with_fallback_or("SERVER_HEALTH_HOST", "HOST", DEFAULT_HOST),
            health_path: None,
            ping_path: None,
            probe_timeout_ms: None,
            http_probes: Vec::new(),
            tcp_probes: Vec::new(),
        }
    }

    /// バインドアドレス
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 環境変数の設定にCLI引数を上書きしたエンドポイント設定
    ///
    /// 上書き後のhealthとpingのパスが同じ場合はエラーを返す。
    pub fn health_config(&self) -> anyhow::Result<HealthConfig> {
        let mut config = HealthConfig::read_env();
        if let Some(path) = &self.health_path {
            config.health_path = normalize_path(path);
        }
        if let Some(path) = &self.ping_path {
            config.ping_path = normalize_path(path);
        }
        if let Some(ms) = self.probe_timeout_ms {
            config.probe_timeout = (ms > 0).then(|| Duration::from_millis(ms));
        }
        config.validate()?;
        Ok(config)
    }
}

/// 引数で指定されたプローブをレジストリに登録する
pub async fn register_probes(registry: &ProbeRegistry, args: &ServeArgs) -> anyhow::Result<()> {
    for probe in &args.http_probes {
        let check = HttpCheck::with_default_client(probe.target.clone())?;
        log_registration(registry.add_check(probe.name.clone(), check).await, probe, "http");
    }
    for probe in &args.tcp_probes {
        let check = TcpCheck::new(probe.target.clone());
        log_registration(registry.add_check(probe.name.clone(), check).await, probe, "tcp");
    }
    Ok(())
}

fn log_registration(status: RegisterStatus, probe: &ProbeArg, kind: &str) {
    if status == RegisterStatus::Registered {
        info!(name = %probe.name, target = %probe.target, kind, "Registered probe");
    }
}

/// serve サブコマンドを実行する
pub async fn execute(args: ServeArgs) -> anyhow::Result<()> {
    info!("server-health v{}", env!("CARGO_PKG_VERSION"));

    let config = args.health_config()?;
    let registry = ProbeRegistry::new();
    register_probes(&registry, &args).await?;

    let metadata = ServiceMetadata::collect(crate::service_info!());
    let service = HealthService::new(registry, metadata).with_probe_timeout(config.probe_timeout);

    info!(
        health_path = %config.health_path,
        ping_path = %config.ping_path,
        "Health routes configured"
    );

    let app = api::create_app(service, &config);
    server::run(app, &args.bind_addr(), ShutdownController::default()).await
}
