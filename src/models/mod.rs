pub mod investigation;
pub mod user;
