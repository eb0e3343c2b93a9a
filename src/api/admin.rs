//! Admin endpoints: pool inspection, reset, and survey submissions.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use super::{
    AccountDto, AccountsResponse, ApiError, ApiResponse, AppState, PoolSummaryDto, ResetResponse,
    SubmissionDto,
};
use crate::api::NotificationEvent;
use crate::api::validation::validate_limit;
use crate::constants::limits;

/// `GET /api/admin/accounts`
///
/// Dumps every account row, passwords included, plus a pool summary.
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<AccountsResponse>>, ApiError> {
    let accounts = state.allocator().list_all().await?;

    let total = accounts.len() as u64;
    let assigned = accounts.iter().filter(|a| a.is_assigned).count() as u64;

    let response = AccountsResponse {
        summary: PoolSummaryDto {
            total,
            assigned,
            available: total - assigned,
        },
        accounts: accounts.into_iter().map(AccountDto::from).collect(),
    };

    Ok(Json(ApiResponse::success(response)))
}

/// `POST /api/admin/accounts/reset`
///
/// Returns every account to the pool. Destructive; assignment history
/// survives only in the `survey_responses` table.
pub async fn reset_accounts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<ResetResponse>>, ApiError> {
    let cleared = state.allocator().reset_all().await?;

    warn!("Pool reset: {} assignment(s) cleared", cleared);
    let _ = state
        .event_bus()
        .send(NotificationEvent::PoolReset { cleared });

    Ok(Json(ApiResponse::success(ResetResponse { reset: cleared })))
}

#[derive(Debug, Deserialize)]
pub struct SubmissionsQuery {
    pub limit: Option<u64>,
}

/// `GET /api/admin/submissions?limit=`
pub async fn list_submissions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SubmissionsQuery>,
) -> Result<Json<ApiResponse<Vec<SubmissionDto>>>, ApiError> {
    let limit = validate_limit(query.limit.unwrap_or(limits::DEFAULT_SUBMISSION_LIMIT))?;

    let submissions = state.store().recent_submissions(limit).await?;

    Ok(Json(ApiResponse::success(
        submissions.into_iter().map(SubmissionDto::from).collect(),
    )))
}
