use crate::services::{HealthAggregator, HealthReport};
use std::sync::Arc;

pub struct CheckHealthUseCase {
    aggregator: Arc<HealthAggregator>,
}

impl CheckHealthUseCase {
    pub fn new(aggregator: Arc<HealthAggregator>) -> Self {
        Self { aggregator }
    }

    pub async fn execute(&self) -> HealthReport {
        self.aggregator.check().await
    }
}
