pub mod cascade;
pub mod session;
