//! # Okta Role Manager Shared
//!
//! Common types and interfaces used across all role manager packages.

pub mod config;
pub mod error;

// Re-exports
pub use config::*;
pub use error::*;
