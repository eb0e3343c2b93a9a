pub mod limits {

    pub const MAX_NAME_LEN: usize = 100;

    pub const MAX_EMAIL_LEN: usize = 254;

    pub const MAX_FREE_TEXT_LEN: usize = 2000;

    pub const MAX_LIST_LIMIT: u64 = 1000;

    pub const DEFAULT_SUBMISSION_LIMIT: u64 = 50;
}

pub mod email {

    /// Wrap width for the plain-text alternative derived from the HTML body.
    pub const TEXT_WRAP_COLUMNS: usize = 80;
}
