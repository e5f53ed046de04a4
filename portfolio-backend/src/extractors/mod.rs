// src/extractors/mod.rs
pub mod acting_user;
pub mod id;

pub use acting_user::{ActingUser, USER_ID_HEADER};
pub use id::IdPath;
