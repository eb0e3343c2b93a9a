mod accounts;
mod reset;
mod status;
mod submissions;

pub use accounts::cmd_accounts;
pub use reset::cmd_reset;
pub use status::cmd_status;
pub use submissions::cmd_submissions;
