//! # Gigboard Common Library
//!
//! Shared code for the gigboard listings service:
//! - Database schema, models, and the record store
//! - Listing aggregation (location grouping, show partitioning, search shaping)
//! - Error types
//! - Configuration loading

pub mod config;
pub mod db;
pub mod error;
pub mod listings;
pub mod time;

pub use error::{Error, Result};
