//! System endpoints: status aggregation and health probes.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, PoolSummaryDto, SystemStatus};

#[derive(Debug, Serialize)]
pub struct HealthLiveResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthReadinessChecks {
    pub database: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthReadyResponse {
    pub ready: bool,
    pub checks: HealthReadinessChecks,
}

/// `GET /api/system/status`
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SystemStatus>>, ApiError> {
    let available = state.allocator().available_count().await?;
    let accounts = state.allocator().list_all().await?;
    let assigned = accounts.iter().filter(|a| a.is_assigned).count() as u64;

    let submissions = state
        .store()
        .submission_count()
        .await
        .map_err(ApiError::from)?;

    let status = SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        pool: PoolSummaryDto {
            total: accounts.len() as u64,
            assigned,
            available,
        },
        submissions,
    };

    Ok(Json(ApiResponse::success(status)))
}

/// `GET /api/system/health/live`
///
/// Lightweight liveness probe to indicate the API process is running.
pub async fn health_live() -> impl IntoResponse {
    Json(ApiResponse::success(HealthLiveResponse { status: "alive" }))
}

/// `GET /api/system/health/ready`
///
/// Readiness probe that checks database connectivity.
pub async fn health_ready(State(state): State<Arc<AppState>>) -> Response {
    let db_ready = state.store().ping().await.is_ok();

    let status = if db_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = ApiResponse::success(HealthReadyResponse {
        ready: db_ready,
        checks: HealthReadinessChecks { database: db_ready },
    });

    (status, Json(body)).into_response()
}
