//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::HealthError;
use axum::{response::IntoResponse, Json};
use tracing::error;

/// Axum用のエラーレスポンス型
///
/// ボディは`{"code": ..., "message": ...}`の形で返す。
#[derive(Debug)]
pub struct AppError(pub HealthError);

impl From<HealthError> for AppError {
    fn from(err: HealthError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if let HealthError::Internal(message) = &self.0 {
            error!(error = %message, "Health endpoint failed");
        }
        (self.0.status_code(), Json(self.0.to_body())).into_response()
    }
}
