pub mod cache;
pub mod chat;
pub mod points;
pub mod quality;
