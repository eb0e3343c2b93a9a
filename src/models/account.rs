use serde::{Deserialize, Serialize};

/// One pre-provisioned beta credential from the account pool.
///
/// An account is either available (`is_assigned == false` and both
/// `assigned_to` and `assigned_at` unset) or assigned. The only way back to
/// available is a global pool reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub is_assigned: bool,
    pub assigned_to: Option<String>,
    pub assigned_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
