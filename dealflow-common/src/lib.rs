//! # Dealflow Common Library
//!
//! Shared code for the Dealflow services including:
//! - Database models and initialization
//! - Comparable valuation engine
//! - Financial strategy calculators
//! - Configuration loading
//! - Common error types

pub mod config;
pub mod db;
pub mod error;
pub mod valuation;

pub use error::{Error, Result};
