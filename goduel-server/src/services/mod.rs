pub mod lobby;
pub mod sweep;
