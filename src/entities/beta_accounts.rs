use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "beta_accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,

    /// Pre-generated secret, delivered to the applicant by email.
    pub password: String,

    pub is_assigned: bool,

    /// Applicant email once assigned. A unique index (created by migration)
    /// guarantees no email ever holds two accounts.
    pub assigned_to: Option<String>,

    pub assigned_at: Option<String>,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
