pub mod club;
pub mod registration;
