pub mod errors;
pub mod db;
pub mod category;
pub mod app_user;
pub mod recipe;
pub mod user_favourite;
