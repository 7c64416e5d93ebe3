pub mod message;
pub mod session;
pub mod time_controls;
