// src/repository/mod.rs
pub mod category_repository;
pub mod image_repository;
pub mod project_repository;
pub mod user_repository;
pub mod video_repository;
