use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "survey_responses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// Stored lowercased so duplicate checks are case-insensitive.
    pub email: String,

    pub contact: Option<String>,

    pub age: String,

    pub gender: String,

    pub orientation: String,

    pub ao3_content: Option<String>,

    pub favorite_cp_tags: Option<String>,

    /// JSON-encoded list of identity selections.
    pub identity: String,

    pub other_identity: Option<String>,

    pub accept_follow_up: bool,

    /// Id of the beta account handed out for this submission, if any.
    pub assigned_account_id: Option<i32>,

    pub submitted_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
