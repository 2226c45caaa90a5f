//! 協調シャットダウン
//!
//! `server::run`がOSシグナルと組み合わせてグレースフルシャットダウンに使う。

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::Notify;

/// サーバー停止要求を伝える共有シグナル
///
/// OSシグナルを使わずに停止させたい場合（テストや組み込み利用）に使う。
#[derive(Clone, Debug, Default)]
pub struct ShutdownController {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    requested: AtomicBool,
    notify: Notify,
}

impl ShutdownController {
    /// 停止が要求済みならtrue
    pub fn is_shutdown_requested(&self) -> bool {
        self.inner.requested.load(Ordering::Acquire)
    }

    /// 停止を要求し、待機中のタスクを全て起こす
    pub fn request_shutdown(&self) {
        self.inner.requested.store(true, Ordering::Release);
        self.inner.notify.notify_waiters();
    }

    /// 停止が要求されるまで待機する
    pub async fn wait(&self) {
        let notified = self.inner.notify.notified();
        // notify_waitersは登録済みの待機者しか起こさないため、登録後にフラグを確認する
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_shutdown_requested() {
            return;
        }
        notified.await;
    }
}
