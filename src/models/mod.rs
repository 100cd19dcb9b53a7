pub mod identifier;
pub mod lenient;
pub mod question;
pub mod submission;
pub mod user;
