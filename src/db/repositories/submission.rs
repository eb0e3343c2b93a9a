use crate::entities::{prelude::*, survey_responses};
use crate::models::submission::{NewSubmission, Submission};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set};
use tracing::info;

/// Repository for survey submission rows.
pub struct SubmissionRepository {
    conn: DatabaseConnection,
}

impl SubmissionRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_submission_model(m: survey_responses::Model) -> Submission {
        let identity = serde_json::from_str(&m.identity).unwrap_or_default();
        Submission {
            id: m.id,
            name: m.name,
            email: m.email,
            contact: m.contact,
            age: m.age,
            gender: m.gender,
            orientation: m.orientation,
            ao3_content: m.ao3_content,
            favorite_cp_tags: m.favorite_cp_tags,
            identity,
            other_identity: m.other_identity,
            accept_follow_up: m.accept_follow_up,
            assigned_account_id: m.assigned_account_id,
            submitted_at: m.submitted_at,
        }
    }

    pub async fn record(
        &self,
        submission: &NewSubmission,
        assigned_account_id: Option<i32>,
    ) -> Result<i32> {
        let identity = serde_json::to_string(&submission.identity)?;

        let active_model = survey_responses::ActiveModel {
            name: Set(submission.name.clone()),
            email: Set(submission.email.clone()),
            contact: Set(submission.contact.clone()),
            age: Set(submission.age.clone()),
            gender: Set(submission.gender.clone()),
            orientation: Set(submission.orientation.clone()),
            ao3_content: Set(submission.ao3_content.clone()),
            favorite_cp_tags: Set(submission.favorite_cp_tags.clone()),
            identity: Set(identity),
            other_identity: Set(submission.other_identity.clone()),
            accept_follow_up: Set(submission.accept_follow_up),
            assigned_account_id: Set(assigned_account_id),
            submitted_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let res = SurveyResponses::insert(active_model).exec(&self.conn).await?;
        info!("Recorded survey submission from {}", submission.email);
        Ok(res.last_insert_id)
    }

    /// Most recent submissions first.
    pub async fn recent(&self, limit: u64) -> Result<Vec<Submission>> {
        let rows = SurveyResponses::find()
            .order_by_desc(survey_responses::Column::SubmittedAt)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_submission_model).collect())
    }

    pub async fn count(&self) -> Result<u64> {
        let count = SurveyResponses::find().count(&self.conn).await?;
        Ok(count)
    }
}
