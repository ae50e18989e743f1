//! Ferrous Watch Application Layer
//!
//! Ports for the runtime collaborators (clock, database, external store,
//! process resources) and the observability core built on top of them.
pub mod context;
pub mod ports;
pub mod services;
pub mod use_cases;

pub use context::ObservabilityContext;
