// src/domain/mod.rs
pub mod category_model;
pub mod image_model;
pub mod project_category_model;
pub mod project_model;
pub mod project_sort;
pub mod user_model;
pub mod video_model;
