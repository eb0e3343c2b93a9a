pub use super::beta_accounts::Entity as BetaAccounts;
pub use super::survey_responses::Entity as SurveyResponses;
