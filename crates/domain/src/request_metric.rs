use serde::Serialize;

/// `METHOD:route` key used by the per-route counters.
pub type RouteKey = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestMetricRecord {
    pub method: String,
    pub route: String,
    pub status_code: u16,
    pub duration_ms: u64,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl RequestMetricRecord {
    pub fn route_key(&self) -> RouteKey {
        route_key(&self.method, &self.route)
    }

    pub fn is_error(&self) -> bool {
        self.status_code >= 400
    }
}

pub fn route_key(method: &str, route: &str) -> RouteKey {
    format!("{}:{}", method, route)
}
