pub mod investigation;
pub mod session;
pub mod user;
