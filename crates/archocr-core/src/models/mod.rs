//! Data models shared across the archocr pipeline.

pub mod config;
pub mod entities;
pub mod report;
