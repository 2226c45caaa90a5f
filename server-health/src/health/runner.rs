//! プローブランナー
//!
//! 登録済みプローブを全て並列に実行し、登録順に結果を返す。
//! 各プローブは個別のタスクで実行されるため、エラーやパニックは
//! そのプローブの`Errored`として記録され、他のプローブには影響しない。
//!
//! タイムアウトはデフォルトで無効。無効の場合、応答しないプローブは
//! ヘルスチェックのレスポンス自体を止めてしまう点に注意すること。

use super::check::{ProbeOutcome, ProbeResult};
use crate::registry::Probe;
use std::any::Any;
use std::time::Duration;
use tokio::task::JoinError;
use tracing::{debug, warn};

/// プローブランナー
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbeRunner {
    /// プローブ1件あたりのタイムアウト
    timeout: Option<Duration>,
}

impl ProbeRunner {
    /// タイムアウトなしのランナーを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// プローブ1件あたりのタイムアウトを設定
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// 設定済みのタイムアウト
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// 全プローブを並列実行し、全ての完了を待って登録順に結果を返す
    pub async fn run(&self, probes: Vec<Probe>) -> Vec<ProbeResult> {
        let timeout = self.timeout;

        let handles: Vec<_> = probes
            .into_iter()
            .map(|probe| {
                let check = probe.check();
                let handle = tokio::spawn(async move {
                    match timeout {
                        Some(limit) => match tokio::time::timeout(limit, check.check()).await {
                            Ok(result) => ProbeOutcome::from_result(result),
                            Err(_) => ProbeOutcome::Errored(format!(
                                "timed out after {}ms",
                                limit.as_millis()
                            )),
                        },
                        None => ProbeOutcome::from_result(check.check().await),
                    }
                });
                (probe, handle)
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());

        for (probe, handle) in handles {
            let outcome = handle.await.unwrap_or_else(outcome_from_join_error);

            match &outcome {
                ProbeOutcome::Errored(reason) => {
                    warn!(probe = %probe.name(), error = %reason, "Connection check errored");
                }
                ProbeOutcome::Malformed(type_name) => {
                    warn!(
                        probe = %probe.name(),
                        got = %type_name,
                        "Connection check returned a non-boolean value"
                    );
                }
                ProbeOutcome::Unhealthy => {
                    debug!(probe = %probe.name(), "Connection check failed");
                }
                ProbeOutcome::Healthy => {}
            }

            results.push(ProbeResult {
                name: probe.name().to_string(),
                outcome,
            });
        }

        results
    }
}

fn outcome_from_join_error(err: JoinError) -> ProbeOutcome {
    if err.is_panic() {
        ProbeOutcome::Errored(format!("panicked: {}", panic_message(err.into_panic())))
    } else {
        ProbeOutcome::Errored("cancelled".to_string())
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
