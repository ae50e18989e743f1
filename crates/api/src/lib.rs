pub mod dto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use middleware::{CacheScope, RequestId, RequestIdentity};
pub use routes::{create_api_routes, with_pipeline};
pub use state::{AppState, PipelineSettings};
