// src/api/dto/mod.rs
pub mod common;
pub mod subscription_dto;

// Re-export common response types
pub use common::{PaginationMeta, PaginationQuery};
