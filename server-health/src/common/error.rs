//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! # エラーレスポンス
//!
//! `HealthError`は`code()`と`status_code()`メソッドを提供し、
//! フレームワーク非依存のエラーボディ（[`ErrorBody`]）を生成できます。
//! axumへの変換は`api::error::AppError`が担当します。

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ヘルスチェック処理のリクエスト単位エラー
///
/// プローブの失敗（`false`や例外）はこの型では表現しない。
/// それらは`ProbeOutcome`としてレスポンスの`connections`に反映される。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HealthError {
    /// 不正なリクエスト（存在しないフィルタパス等）
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 内部エラー（接続チェックが真偽値以外を返した等）
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HealthError {
    /// 存在しないフィルタパスに対するエラーを作成
    pub fn invalid_filter_path(path: &str) -> Self {
        Self::BadRequest(format!("Invalid filter path \"{}\"", path))
    }

    /// 真偽値以外を返した接続チェックに対するエラーを作成
    pub fn non_boolean_check(name: &str, type_name: &str) -> Self {
        Self::Internal(format!(
            "connection check for {} must return boolean, got {}",
            name, type_name
        ))
    }

    /// エラー種別名（`Error`サフィックスなし）
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BadRequest",
            Self::Internal(_) => "Internal",
        }
    }

    /// クライアントに返すメッセージ
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(message) | Self::Internal(message) => message,
        }
    }

    /// 対応するHTTPステータスコード
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// レスポンスボディに変換する
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code().to_string(),
            message: self.message().to_string(),
        }
    }
}

/// エラーレスポンスボディ
///
/// # Example
///
/// ```json
/// {
///   "code": "BadRequest",
///   "message": "Invalid filter path \"foo\""
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// エラー種別名
    pub code: String,
    /// エラーメッセージ
    pub message: String,
}

/// ヘルスチェック用のResult型
pub type HealthResult<T> = Result<T, HealthError>;
