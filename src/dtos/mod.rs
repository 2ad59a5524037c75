pub mod category;
pub mod movie;
pub mod user;
