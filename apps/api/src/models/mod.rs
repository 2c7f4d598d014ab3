pub mod conversation;
pub mod resume;
