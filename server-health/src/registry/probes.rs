//! プローブレジストリ
//!
//! 接続チェックを登録順に保持する。ヘルスチェック実行時は
//! スナップショット（`Arc`のコピー）を取得するため、実行中の登録・リセットが
//! 進行中のチェックに影響することはない。

use crate::health::check::{AsyncFnCheck, ConnectionCheck, IntoCheckResult, SyncFnCheck};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// 名前付きの接続チェック
#[derive(Clone)]
pub struct Probe {
    name: String,
    check: Arc<dyn ConnectionCheck>,
}

impl Probe {
    /// 新しいプローブを作成
    pub fn new(name: impl Into<String>, check: impl ConnectionCheck + 'static) -> Self {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// 接続名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// チェック本体
    pub fn check(&self) -> Arc<dyn ConnectionCheck> {
        Arc::clone(&self.check)
    }
}

impl fmt::Debug for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Probe").field("name", &self.name).finish()
    }
}

/// 登録結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterStatus {
    /// 新規登録
    Registered,
    /// 同名の既存プローブを置き換えた
    Replaced,
}

/// プローブレジストリ
///
/// 同名のプローブを再登録した場合は後から登録したものが有効になる。
/// 置き換えは最初の登録位置で行うため、失敗一覧の順序は変わらない。
#[derive(Clone, Default)]
pub struct ProbeRegistry {
    probes: Arc<RwLock<Vec<Probe>>>,
}

impl ProbeRegistry {
    /// 空のレジストリを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// プローブを登録
    pub async fn add_check(
        &self,
        name: impl Into<String>,
        check: impl ConnectionCheck + 'static,
    ) -> RegisterStatus {
        self.register(Probe::new(name, check)).await
    }

    /// 同期クロージャをプローブとして登録
    ///
    /// ```
    /// use server_health::registry::ProbeRegistry;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let registry = ProbeRegistry::new();
    /// registry.add_fn("database", || true).await;
    /// assert_eq!(registry.len().await, 1);
    /// # }
    /// ```
    pub async fn add_fn<F, R>(&self, name: impl Into<String>, f: F) -> RegisterStatus
    where
        F: Fn() -> R + Send + Sync + 'static,
        R: IntoCheckResult + 'static,
    {
        self.add_check(name, SyncFnCheck::new(f)).await
    }

    /// 非同期クロージャをプローブとして登録
    pub async fn add_async_fn<F, Fut, R>(&self, name: impl Into<String>, f: F) -> RegisterStatus
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoCheckResult + 'static,
    {
        self.add_check(name, AsyncFnCheck::new(f)).await
    }

    /// 作成済みのプローブを登録
    pub async fn register(&self, probe: Probe) -> RegisterStatus {
        let mut probes = self.probes.write().await;

        if let Some(existing) = probes.iter_mut().find(|p| p.name == probe.name) {
            warn!(
                probe = %probe.name,
                "Connection check registered twice, replacing the previous one"
            );
            *existing = probe;
            return RegisterStatus::Replaced;
        }

        debug!(probe = %probe.name, "Connection check registered");
        probes.push(probe);
        RegisterStatus::Registered
    }

    /// 全プローブを削除
    pub async fn reset(&self) {
        let mut probes = self.probes.write().await;
        if !probes.is_empty() {
            debug!(count = probes.len(), "Connection checks reset");
            probes.clear();
        }
    }

    /// 登録順のスナップショットを取得
    pub async fn snapshot(&self) -> Vec<Probe> {
        self.probes.read().await.clone()
    }

    /// 登録順の接続名一覧
    pub async fn names(&self) -> Vec<String> {
        self.probes
            .read()
            .await
            .iter()
            .map(|p| p.name.clone())
            .collect()
    }

    /// 登録数
    pub async fn len(&self) -> usize {
        self.probes.read().await.len()
    }

    /// 空かどうか
    pub async fn is_empty(&self) -> bool {
        self.probes.read().await.is_empty()
    }
}

impl fmt::Debug for ProbeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeRegistry").finish_non_exhaustive()
    }
}
