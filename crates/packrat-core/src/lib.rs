//! # packrat-core
//!
//! Core crate for Packrat. Contains configuration schemas, the typed
//! item identifier, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Packrat crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
