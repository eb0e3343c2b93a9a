pub mod allocator_service;
pub mod allocator_service_impl;
pub use allocator_service::{AccountAllocator, AllocatorError, AssignOutcome};
pub use allocator_service_impl::SeaOrmAccountAllocator;

pub mod signup_service;
pub mod signup_service_impl;
pub use signup_service::{SignupError, SignupReceipt, SignupService};
pub use signup_service_impl::DefaultSignupService;

pub mod mailer_service;
pub mod mailer_service_impl;
pub use mailer_service::{MailerError, MailerService};
pub use mailer_service_impl::HttpMailerService;

pub mod templates;
