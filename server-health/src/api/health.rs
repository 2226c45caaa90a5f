//! ヘルスチェックAPIハンドラー

use super::error::AppError;
use crate::common::error::HealthError;
use crate::common::types::HealthReport;
use crate::health::HealthService;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

/// ヘルスチェックのクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct HealthQuery {
    /// カンマ区切りのプロパティパス（例: `status,env.nodeEnv`）
    pub filter: Option<String>,
}

/// GET /health
///
/// クエリ文字列が解釈できない場合もJSONの`BadRequest`で返す。
pub async fn get_health(
    State(service): State<HealthService>,
    query: Result<Query<HealthQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) =
        query.map_err(|rejection| HealthError::BadRequest(rejection.body_text()))?;
    let report = service.run_health_check(query.filter.as_deref()).await?;
    Ok(report_response(report))
}

/// GET /ping
pub async fn get_ping(State(service): State<HealthService>) -> Result<Response, AppError> {
    let report = service.run_ping().await?;
    Ok(report_response(report))
}

fn report_response(report: HealthReport) -> Response {
    (report.status_code, Json(report.document)).into_response()
}
