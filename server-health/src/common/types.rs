//! 共通型定義
//!
//! StatusDocument, PingDocument等のレスポンスデータ型
//!
//! JSONのキー名（`upSince`, `env.nodeEnv`等）は既存のダッシュボードや
//! 監視設定との互換性のため固定されている。

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 接続チェックの結果（`connections`の各エントリ）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// 依存サービスに到達可能
    Ok,
    /// 依存サービスに到達不可、またはチェック自体が失敗
    Fail,
}

impl ConnectionState {
    /// 正常かどうか
    pub fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// 接続名 → 接続状態のマッピング
pub type Connections = BTreeMap<String, ConnectionState>;

/// サービス記述子
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceInfo {
    /// サービス名
    pub name: String,
    /// サービスの説明
    pub description: String,
    /// バージョン
    pub version: String,
}

impl ServiceInfo {
    /// 新しいサービス記述子を作成
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            version: version.into(),
        }
    }
}

/// 呼び出し側クレートの`Cargo.toml`から[`ServiceInfo`]を作成する
///
/// `env!`は呼び出し側で展開されるため、組み込み先サービスの
/// パッケージ名・説明・バージョンが入る。
#[macro_export]
macro_rules! service_info {
    () => {
        $crate::common::types::ServiceInfo::new(
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_DESCRIPTION"),
            env!("CARGO_PKG_VERSION"),
        )
    };
}

/// VCS（git）記述子
///
/// リポジトリが見つからない場合は全フィールドが`null`になる。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GitInfo {
    /// HEADのコミットハッシュ
    pub commit_hash: Option<String>,
    /// ブランチ名（detached HEADの場合は`None`）
    pub branch_name: Option<String>,
    /// HEADを指すタグ
    pub tag: Option<String>,
}

/// プロセス環境のスナップショット
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnvInfo {
    /// 実行環境名（`SERVER_HEALTH_ENV`、旧: `NODE_ENV`）
    pub node_env: Option<String>,
    /// ランタイム（rustc）バージョン
    pub node_version: String,
    /// プロセス名
    pub process_name: String,
    /// プロセスID
    pub pid: u32,
    /// カレントディレクトリ
    pub cwd: String,
}

/// `/ping`用の縮小版環境情報（`cwd`なし）
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PingEnvInfo {
    /// 実行環境名
    pub node_env: Option<String>,
    /// ランタイムバージョン
    pub node_version: String,
    /// プロセス名
    pub process_name: String,
    /// プロセスID
    pub pid: u32,
}

impl From<&EnvInfo> for PingEnvInfo {
    fn from(env: &EnvInfo) -> Self {
        Self {
            node_env: env.node_env.clone(),
            node_version: env.node_version.clone(),
            process_name: env.process_name.clone(),
            pid: env.pid,
        }
    }
}

/// `/health`のレスポンスドキュメント
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusDocument {
    /// `ok` または `fail:<失敗した接続名>`
    pub status: String,
    /// 稼働時間（秒）
    pub uptime: f64,
    /// 起動時刻
    pub up_since: DateTime<Utc>,
    /// 現在時刻
    pub local_time: DateTime<Utc>,
    /// サービス記述子
    pub service: ServiceInfo,
    /// 接続チェック結果
    pub connections: Connections,
    /// プロセス環境
    pub env: EnvInfo,
    /// git情報
    pub git: GitInfo,
}

/// `/ping`のレスポンスドキュメント
///
/// フィルタ非対応、git情報なし。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PingDocument {
    /// 稼働時間（秒）
    pub uptime: f64,
    /// 起動時刻
    pub up_since: DateTime<Utc>,
    /// サービスのバージョン
    pub version: String,
    /// 接続チェック結果
    pub connections: Connections,
    /// プロセス環境
    pub env: PingEnvInfo,
}

/// ヘルスチェック1回分の結果（フレームワーク非依存）
#[derive(Debug, Clone, PartialEq)]
pub struct HealthReport {
    /// HTTPステータスコード（200 または 500）
    pub status_code: StatusCode,
    /// レスポンスボディ（フィルタ適用済み）
    pub document: serde_json::Value,
}

impl HealthReport {
    /// 全接続が正常かどうか
    pub fn is_healthy(&self) -> bool {
        self.status_code == StatusCode::OK
    }
}
