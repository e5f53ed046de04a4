// src/service/mod.rs
pub mod category_service;
pub mod image_service;
pub mod project_service;
pub mod storage_service;
pub mod user_service;
pub mod video_service;
