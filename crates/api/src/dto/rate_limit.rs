use serde::Serialize;

/// Body of a 429 answer. `retryAfter` is the field name clients already parse.
#[derive(Serialize, Debug, Clone)]
pub struct RateLimitRejection {
    pub error: String,
    #[serde(rename = "retryAfter")]
    pub retry_after: u64,
}
