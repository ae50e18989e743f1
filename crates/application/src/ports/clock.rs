/// Source of wall-clock timestamps for cache entries and metric records.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;
}
