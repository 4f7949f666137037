//! REST API implementation for the Dealflow backend
//!
//! One handler module per dashboard feature area, wired together by
//! `server::create_router`.

pub mod analysis;
pub mod campaigns;
pub mod communications;
pub mod handlers;
pub mod leads;
pub mod properties;
pub mod sample_data;
pub mod schedule;
pub mod server;

pub use server::{create_router, AppContext};
