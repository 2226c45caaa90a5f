//! ヘルスチェック
//!
//! リクエストごとに登録済みの接続チェックを実行し、集約したステータスを返す。
//!
//! 処理の流れ: ProbeRegistry → [`runner`] → [`aggregator`] → [`filter`]
//!
//! [`HealthService::run_health_check`]はフレームワーク非依存のエントリポイントで、
//! axumへの組み込みは`api`モジュールが担当する。

pub mod aggregator;
pub mod check;
pub mod filter;
pub mod probes;
pub mod runner;

pub use check::{ConnectionCheck, ProbeOutcome, ProbeResult};
pub use probes::{HttpCheck, TcpCheck};
pub use runner::ProbeRunner;

use crate::common::error::{HealthError, HealthResult};
use crate::common::types::HealthReport;
use crate::metadata::ServiceMetadata;
use crate::registry::ProbeRegistry;
use aggregator::Aggregation;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// ヘルスチェックサービス
///
/// レジストリとメタデータを保持する。クローンは同じレジストリを共有する。
#[derive(Debug, Clone)]
pub struct HealthService {
    registry: ProbeRegistry,
    metadata: Arc<ServiceMetadata>,
    runner: ProbeRunner,
}

impl HealthService {
    /// 新しいサービスを作成（プローブのタイムアウトなし）
    pub fn new(registry: ProbeRegistry, metadata: ServiceMetadata) -> Self {
        Self {
            registry,
            metadata: Arc::new(metadata),
            runner: ProbeRunner::new(),
        }
    }

    /// プローブ1件あたりのタイムアウトを設定
    pub fn with_probe_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.runner = self.runner.with_timeout(timeout);
        self
    }

    /// プローブレジストリ
    pub fn registry(&self) -> &ProbeRegistry {
        &self.registry
    }

    /// サービスメタデータ
    pub fn metadata(&self) -> &ServiceMetadata {
        &self.metadata
    }

    /// `/health`: 全プローブを実行し、フィルタを適用したステータスを返す
    pub async fn run_health_check(&self, filter: Option<&str>) -> HealthResult<HealthReport> {
        let aggregation = self.run_probes().await?;
        let status_code = aggregation.status_code;

        let document =
            aggregator::build_status_document(aggregation, &self.metadata, Utc::now());
        let document = filter::apply_filter(to_json(&document)?, filter)?;

        Ok(HealthReport {
            status_code,
            document,
        })
    }

    /// `/ping`: 縮小版のステータスを返す（フィルタなし）
    pub async fn run_ping(&self) -> HealthResult<HealthReport> {
        let aggregation = self.run_probes().await?;
        let status_code = aggregation.status_code;

        let document = aggregator::build_ping_document(aggregation, &self.metadata);

        Ok(HealthReport {
            status_code,
            document: to_json(&document)?,
        })
    }

    async fn run_probes(&self) -> HealthResult<Aggregation> {
        let probes = self.registry.snapshot().await;
        let count = probes.len();
        let start = Instant::now();

        let results = self.runner.run(probes).await;
        let aggregation = aggregator::aggregate(&results)?;

        if aggregation.is_healthy() {
            debug!(
                probes = count,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Health check passed"
            );
        } else {
            warn!(
                probes = count,
                failed = %aggregation.failed.join(","),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Health check failed"
            );
        }

        Ok(aggregation)
    }
}

fn to_json<T: Serialize>(document: &T) -> HealthResult<serde_json::Value> {
    serde_json::to_value(document).map_err(|e| HealthError::Internal(e.to_string()))
}
