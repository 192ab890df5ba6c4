// src/utils/mod.rs
pub mod config;
pub mod error;
pub mod logging;
pub mod text;
pub mod validate;

pub use error::{AppError, WikiError}; // Re-export main error types for convenience
