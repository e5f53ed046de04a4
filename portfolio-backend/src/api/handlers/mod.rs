// src/api/handlers/mod.rs
pub mod category_handler;
pub mod media_handler;
pub mod project_handler;
pub mod system_handler;
pub mod user_handler;
