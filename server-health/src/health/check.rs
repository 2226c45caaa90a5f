//! 接続チェックの抽象化
//!
//! 同期・非同期どちらのチェックも[`ConnectionCheck`]として統一的に扱い、
//! 生の戻り値を[`ProbeOutcome`]に正規化する。

use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;

/// 接続チェックの生の戻り値
///
/// 正しいチェックは`Value::Bool`を返す。それ以外の値は
/// チェック自体の実装不備（[`ProbeOutcome::Malformed`]）として扱われる。
pub type CheckResult = anyhow::Result<Value>;

/// 依存サービス1つの到達性を確認するチェック
///
/// 冪等かつ副作用なしであること。1回のヘルスチェックにつき1回呼ばれる。
#[async_trait]
pub trait ConnectionCheck: Send + Sync {
    /// チェックを実行する
    async fn check(&self) -> CheckResult;
}

/// チェック関数の戻り値を[`CheckResult`]に変換する
pub trait IntoCheckResult {
    /// 変換する
    fn into_check_result(self) -> CheckResult;
}

impl IntoCheckResult for bool {
    fn into_check_result(self) -> CheckResult {
        Ok(Value::Bool(self))
    }
}

impl IntoCheckResult for Value {
    fn into_check_result(self) -> CheckResult {
        Ok(self)
    }
}

impl IntoCheckResult for String {
    fn into_check_result(self) -> CheckResult {
        Ok(Value::String(self))
    }
}

impl IntoCheckResult for &'static str {
    fn into_check_result(self) -> CheckResult {
        Ok(Value::String(self.to_string()))
    }
}

impl<T, E> IntoCheckResult for Result<T, E>
where
    T: IntoCheckResult,
    E: Into<anyhow::Error>,
{
    fn into_check_result(self) -> CheckResult {
        self.map_err(Into::<anyhow::Error>::into)?.into_check_result()
    }
}

/// 同期クロージャによるチェック
pub struct SyncFnCheck<F>(F);

impl<F> SyncFnCheck<F> {
    /// クロージャをラップする
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F, R> ConnectionCheck for SyncFnCheck<F>
where
    F: Fn() -> R + Send + Sync,
    R: IntoCheckResult,
{
    async fn check(&self) -> CheckResult {
        (self.0)().into_check_result()
    }
}

/// 非同期クロージャ（Futureを返す関数）によるチェック
pub struct AsyncFnCheck<F>(F);

impl<F> AsyncFnCheck<F> {
    /// クロージャをラップする
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F, Fut, R> ConnectionCheck for AsyncFnCheck<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send,
    R: IntoCheckResult,
{
    async fn check(&self) -> CheckResult {
        (self.0)().await.into_check_result()
    }
}

/// 正規化されたチェック結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// `true`を返した
    Healthy,
    /// `false`を返した
    Unhealthy,
    /// 真偽値以外を返した（値の型名を保持）
    Malformed(String),
    /// エラー・パニック・タイムアウトで完了しなかった
    Errored(String),
}

impl ProbeOutcome {
    /// 生の戻り値を正規化する
    pub fn from_result(result: CheckResult) -> Self {
        match result {
            Ok(Value::Bool(true)) => Self::Healthy,
            Ok(Value::Bool(false)) => Self::Unhealthy,
            Ok(other) => Self::Malformed(json_type_name(&other).to_string()),
            Err(err) => Self::Errored(format!("{:#}", err)),
        }
    }
}

/// 1つのプローブの実行結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// 接続名
    pub name: String,
    /// 正規化された結果
    pub outcome: ProbeOutcome,
}

/// JSON値の型名
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
