//! Database queries for dealflow-api
//!
//! One query module per feature area, all operating on the shared
//! SQLite pool initialized by `dealflow_common::db`.

pub mod analyses;
pub mod campaigns;
pub mod communications;
pub mod leads;
pub mod properties;
pub mod schedule;
pub mod settings;
