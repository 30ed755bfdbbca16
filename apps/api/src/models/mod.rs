pub mod course;
pub mod message;
pub mod user;
