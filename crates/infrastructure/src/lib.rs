//! Ferrous Watch Infrastructure Layer
//!
//! Adapters for the application ports: wall clock, SQLite, Redis and
//! process resource readings.
pub mod clock;
pub mod database;
pub mod external_store;
pub mod system;
