use serde::{Deserialize, Serialize};

/// A validated survey submission, ready to be persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubmission {
    pub name: String,
    /// Lowercased during validation.
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
}

/// A stored survey submission row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
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
