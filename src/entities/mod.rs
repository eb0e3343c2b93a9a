pub mod prelude;

pub mod beta_accounts;
pub mod survey_responses;
