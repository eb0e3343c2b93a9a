//! Public signup endpoints.

use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, RemainingResponse, SignupResponseDto, SurveyRequest};
use crate::api::validation::validate_survey;
use crate::services::SignupError;

impl From<SignupError> for ApiError {
    fn from(err: SignupError) -> Self {
        match err {
            SignupError::DuplicateEmail => Self::Conflict(err.to_string()),
            SignupError::PoolExhausted => Self::Gone(err.to_string()),
            SignupError::StoreUnavailable(msg) => Self::DatabaseError(msg),
            SignupError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

/// `POST /api/signup`
///
/// Validates the survey, hands out one account, and reports how many
/// spots are left. Credentials only appear in the body when the email
/// could not be delivered.
pub async fn submit_survey(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SurveyRequest>,
) -> Result<Json<ApiResponse<SignupResponseDto>>, ApiError> {
    let submission = validate_survey(request)?;

    let receipt = state.signup().submit(submission).await?;

    let response = if receipt.email_sent {
        SignupResponseDto {
            username: receipt.account.username,
            password: None,
            remaining: receipt.remaining,
            email_sent: true,
            message: "Your beta account credentials have been emailed to you".to_string(),
        }
    } else {
        SignupResponseDto {
            username: receipt.account.username,
            password: Some(receipt.account.password),
            remaining: receipt.remaining,
            email_sent: false,
            message:
                "We could not email your credentials; please save them from this page".to_string(),
        }
    };

    Ok(Json(ApiResponse::success(response)))
}

/// `GET /api/signup/remaining`
pub async fn remaining(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<RemainingResponse>>, ApiError> {
    let remaining = state.signup().remaining().await?;
    Ok(Json(ApiResponse::success(RemainingResponse { remaining })))
}
