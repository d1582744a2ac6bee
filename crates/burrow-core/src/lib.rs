//! Core types and traits for the Burrow URL shortener.
//!
//! This crate provides the types shared by the registry and the
//! collaborators (menu CLI, HTTP gateway) that drive it.

pub mod error;
pub mod record;
pub mod shortcode;
pub mod shortener;

pub use error::CoreError;
pub use record::UrlRecord;
pub use shortcode::ShortCode;
pub use shortener::Shortener;
