//! サービスメタデータ
//!
//! ヘルスエンドポイントが返す静的な記述子（パッケージ情報、git状態、
//! プロセス環境のスナップショット）。サービス作成時に一度だけ収集する。

pub mod env;
pub mod git;

use crate::common::types::{EnvInfo, GitInfo, ServiceInfo};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// サービス・プロセスの静的メタデータ
#[derive(Debug, Clone)]
pub struct ServiceMetadata {
    service: ServiceInfo,
    git: GitInfo,
    env: EnvInfo,
    started_at: DateTime<Utc>,
    started: Instant,
}

impl ServiceMetadata {
    /// 現在のプロセスのメタデータを収集する
    ///
    /// git情報はカレントディレクトリから探索する。
    pub fn collect(service: ServiceInfo) -> Self {
        let env = env::capture();
        let git = git::discover(Path::new(&env.cwd));

        debug!(
            service = %service.name,
            version = %service.version,
            commit = ?git.commit_hash,
            "Collected service metadata"
        );

        Self::from_parts(service, git, env)
    }

    /// 各要素を指定してメタデータを作成
    pub fn from_parts(service: ServiceInfo, git: GitInfo, env: EnvInfo) -> Self {
        Self {
            service,
            git,
            env,
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }

    /// サービス記述子
    pub fn service(&self) -> &ServiceInfo {
        &self.service
    }

    /// git記述子
    pub fn git(&self) -> &GitInfo {
        &self.git
    }

    /// 環境スナップショット
    pub fn env(&self) -> &EnvInfo {
        &self.env
    }

    /// 起動時刻
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// 起動からの経過秒数
    pub fn uptime_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}
