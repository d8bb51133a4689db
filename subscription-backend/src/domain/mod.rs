// src/domain/mod.rs
pub mod sub_filter;
pub mod subscription;
pub mod subscription_model;
