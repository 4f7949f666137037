//! # Dealflow API Library (dealflow-api)
//!
//! REST backend for the real-estate lead/property-management dashboard.
//!
//! **Purpose:** CRUD over properties, leads, campaigns, communications,
//! and appointments, plus the comparable-valuation and strategy-analysis
//! endpoints built on `dealflow_common::valuation`.

pub mod api;
pub mod db;
pub mod error;

pub use error::{Error, Result};
