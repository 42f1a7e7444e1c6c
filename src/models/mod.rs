pub mod chat;
pub mod report;
