pub mod login;
pub mod resume;
pub mod template;
