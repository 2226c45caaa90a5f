//! ステータス集約
//!
//! プローブ結果とサービスメタデータからレスポンスドキュメントと
//! HTTPステータスコードを決定する。
//!
//! 真偽値以外を返したプローブが1つでもあれば、部分的なドキュメントは返さず
//! `Internal`エラーで集約を打ち切る（登録順で最初のものを報告）。

use super::check::{ProbeOutcome, ProbeResult};
use crate::common::error::{HealthError, HealthResult};
use crate::common::types::{
    ConnectionState, Connections, PingDocument, PingEnvInfo, StatusDocument,
};
use crate::metadata::ServiceMetadata;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};

/// 全体ステータスが正常な場合の値
pub const STATUS_OK: &str = "ok";

/// 失敗時ステータスのプレフィックス
pub const STATUS_FAIL_PREFIX: &str = "fail:";

/// プローブ結果の集約
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    /// `ok` または `fail:<名前,...>`
    pub status: String,
    /// 200 または 500
    pub status_code: StatusCode,
    /// 接続名 → 状態
    pub connections: Connections,
    /// 失敗した接続名（登録順）
    pub failed: Vec<String>,
}

impl Aggregation {
    /// 全接続が正常かどうか
    pub fn is_healthy(&self) -> bool {
        self.failed.is_empty()
    }
}

/// プローブ結果を集約する
pub fn aggregate(results: &[ProbeResult]) -> HealthResult<Aggregation> {
    let mut connections = Connections::new();
    let mut failed = Vec::new();

    for result in results {
        let state = match &result.outcome {
            ProbeOutcome::Healthy => ConnectionState::Ok,
            ProbeOutcome::Unhealthy | ProbeOutcome::Errored(_) => ConnectionState::Fail,
            ProbeOutcome::Malformed(type_name) => {
                return Err(HealthError::non_boolean_check(&result.name, type_name));
            }
        };

        if !state.is_ok() {
            failed.push(result.name.clone());
        }
        connections.insert(result.name.clone(), state);
    }

    let (status, status_code) = if failed.is_empty() {
        (STATUS_OK.to_string(), StatusCode::OK)
    } else {
        (
            format!("{}{}", STATUS_FAIL_PREFIX, failed.join(",")),
            StatusCode::INTERNAL_SERVER_ERROR,
        )
    };

    Ok(Aggregation {
        status,
        status_code,
        connections,
        failed,
    })
}

/// `/health`のドキュメントを構築する
pub fn build_status_document(
    aggregation: Aggregation,
    metadata: &ServiceMetadata,
    now: DateTime<Utc>,
) -> StatusDocument {
    StatusDocument {
        status: aggregation.status,
        uptime: metadata.uptime_secs(),
        up_since: metadata.started_at(),
        local_time: now,
        service: metadata.service().clone(),
        connections: aggregation.connections,
        env: metadata.env().clone(),
        git: metadata.git().clone(),
    }
}

/// `/ping`のドキュメントを構築する
pub fn build_ping_document(aggregation: Aggregation, metadata: &ServiceMetadata) -> PingDocument {
    PingDocument {
        uptime: metadata.uptime_secs(),
        up_since: metadata.started_at(),
        version: metadata.service().version.clone(),
        connections: aggregation.connections,
        env: PingEnvInfo::from(metadata.env()),
    }
}
