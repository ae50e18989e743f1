use serde::Serialize;

/// Point-in-time process and host resource readings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessResources {
    /// Resident memory of this process.
    pub memory_used_bytes: u64,
    pub total_memory_bytes: u64,
    pub cpu_usage_percent: f32,
    pub cpu_count: usize,
    /// 1, 5 and 15 minute load averages.
    pub load_average: [f64; 3],
    pub uptime_seconds: u64,
}

impl ProcessResources {
    pub fn memory_ratio(&self) -> f64 {
        if self.total_memory_bytes == 0 {
            0.0
        } else {
            self.memory_used_bytes as f64 / self.total_memory_bytes as f64
        }
    }
}

/// Port for reading live resource usage.
pub trait ResourceProbe: Send + Sync {
    fn snapshot(&self) -> ProcessResources;
}
