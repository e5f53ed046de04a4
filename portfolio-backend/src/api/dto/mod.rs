// src/api/dto/mod.rs
pub mod category_dto;
pub mod media_dto;
pub mod project_dto;
pub mod user_dto;
