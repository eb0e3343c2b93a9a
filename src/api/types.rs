use serde::{Deserialize, Serialize};

use crate::models::account::Account;
use crate::models::submission::Submission;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Raw survey payload as submitted by the signup form. Validated into a
/// `NewSubmission` before anything touches the database.
#[derive(Debug, Deserialize)]
pub struct SurveyRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub contact: Option<String>,
    pub age: String,
    pub gender: String,
    pub orientation: String,
    #[serde(default)]
    pub ao3_content: Option<String>,
    #[serde(default)]
    pub favorite_cp_tags: Option<String>,
    #[serde(default)]
    pub identity: Vec<String>,
    #[serde(default)]
    pub other_identity: Option<String>,
    #[serde(default)]
    pub accept_follow_up: bool,
}

/// Response body for an accepted signup.
///
/// `password` is only present when the credentials email could not be
/// delivered; the form then shows the credentials directly.
#[derive(Debug, Serialize)]
pub struct SignupResponseDto {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub remaining: u64,
    pub email_sent: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct RemainingResponse {
    pub remaining: u64,
}

/// Full account row for the admin view, password included.
#[derive(Debug, Serialize)]
pub struct AccountDto {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub is_assigned: bool,
    pub assigned_to: Option<String>,
    pub assigned_at: Option<String>,
}

impl From<Account> for AccountDto {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            password: account.password,
            is_assigned: account.is_assigned,
            assigned_to: account.assigned_to,
            assigned_at: account.assigned_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PoolSummaryDto {
    pub total: u64,
    pub assigned: u64,
    pub available: u64,
}

#[derive(Debug, Serialize)]
pub struct AccountsResponse {
    pub summary: PoolSummaryDto,
    pub accounts: Vec<AccountDto>,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub reset: u64,
}

#[derive(Debug, Serialize)]
pub struct SubmissionDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub contact: Option<String>,
    pub age: String,
    pub gender: String,
    pub orientation: String,
    pub ao3_content: Option<String>,
    pub favorite_cp_tags: Option<String>,
    pub identity: Vec<String>,
    pub other_identity: Option<String>,
    pub accept_follow_up: bool,
    pub assigned_account_id: Option<i32>,
    pub submitted_at: String,
}

impl From<Submission> for SubmissionDto {
    fn from(s: Submission) -> Self {
        Self {
            id: s.id,
            name: s.name,
            email: s.email,
            contact: s.contact,
            age: s.age,
            gender: s.gender,
            orientation: s.orientation,
            ao3_content: s.ao3_content,
            favorite_cp_tags: s.favorite_cp_tags,
            identity: s.identity,
            other_identity: s.other_identity,
            accept_follow_up: s.accept_follow_up,
            assigned_account_id: s.assigned_account_id,
            submitted_at: s.submitted_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime_seconds: u64,
    pub pool: PoolSummaryDto,
    pub submissions: u64,
}
