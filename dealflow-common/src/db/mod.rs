//! Database access layer
//!
//! SQLite-backed persistence shared by the Dealflow services.

pub mod init;
pub mod models;

pub use init::init_database;
