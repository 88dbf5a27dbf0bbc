//! HTTP API for archival document OCR.
//!
//! Exposes image recognition, entity extraction, and DOCX export over axum.

pub mod error;
pub mod handlers;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use server::{create_router, serve};
pub use types::AppState;
