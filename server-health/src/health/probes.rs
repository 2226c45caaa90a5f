//! 組み込みの接続チェック
//!
//! HTTPエンドポイントやTCPポートの到達性を確認する汎用チェック。
//! 到達できない場合はエラーではなく`false`を返す。

use super::check::{CheckResult, ConnectionCheck};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::debug;

/// 組み込みチェックのデフォルトタイムアウト（秒）
pub const DEFAULT_CHECK_TIMEOUT_SECS: u64 = 5;

/// HTTP GETで2xxが返ることを確認するチェック
#[derive(Debug, Clone)]
pub struct HttpCheck {
    client: Client,
    url: String,
}

impl HttpCheck {
    /// 共有HTTPクライアントを使うチェックを作成
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// デフォルトタイムアウト付きのクライアントでチェックを作成
    pub fn with_default_client(url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_CHECK_TIMEOUT_SECS))
            .build()?;
        Ok(Self::new(client, url))
    }

    /// 確認対象のURL
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ConnectionCheck for HttpCheck {
    async fn check(&self) -> CheckResult {
        let reachable = match self.client.get(&self.url).send().await {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    debug!(url = %self.url, status = %status, "HTTP check got non-success status");
                }
                status.is_success()
            }
            Err(e) => {
                debug!(url = %self.url, error = %e, "HTTP check request failed");
                false
            }
        };
        Ok(Value::Bool(reachable))
    }
}

/// TCP接続が確立できることを確認するチェック
#[derive(Debug, Clone)]
pub struct TcpCheck {
    addr: String,
    timeout: Duration,
}

impl TcpCheck {
    /// `host:port`へのチェックを作成
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            timeout: Duration::from_secs(DEFAULT_CHECK_TIMEOUT_SECS),
        }
    }

    /// 接続タイムアウトを設定
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 確認対象のアドレス
    pub fn addr(&self) -> &str {
        &self.addr
    }
}

#[async_trait]
impl ConnectionCheck for TcpCheck {
    async fn check(&self) -> CheckResult {
        let reachable = match tokio::time::timeout(self.timeout, TcpStream::connect(&self.addr)).await
        {
            Ok(Ok(_stream)) => true,
            Ok(Err(e)) => {
                debug!(addr = %self.addr, error = %e, "TCP check connect failed");
                false
            }
            Err(_) => {
                debug!(addr = %self.addr, "TCP check timed out");
                false
            }
        };
        Ok(Value::Bool(reachable))
    }
}
