pub mod health;
pub mod rate_limit;

pub use health::HealthResponse;
pub use rate_limit::RateLimitRejection;
