mod client_ip;
mod rate_limit;
mod request_context;
mod request_metrics;
mod response_cache;
mod timeout;

pub use client_ip::client_key;
pub use rate_limit::{rate_limit, slow_down, strict_rate_limit};
pub use request_context::{request_context, RequestId};
pub use request_metrics::track_request_metrics;
pub use response_cache::{cache_responses, CacheScope, RequestIdentity};
pub use timeout::request_timeout;
