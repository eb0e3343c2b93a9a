pub mod account;
pub mod submission;
