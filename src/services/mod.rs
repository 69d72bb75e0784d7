pub mod jobs;
pub mod mailer;
pub mod notify;
pub mod product;
pub mod telegram;
