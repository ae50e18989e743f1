use crate::services::{
    PrometheusExporter, QueryPerformanceMonitor, RequestMetricsCollector, ResponseCache,
};
use std::sync::Arc;

pub struct ExportMetricsUseCase {
    exporter: Arc<PrometheusExporter>,
    request_metrics: Arc<RequestMetricsCollector>,
    query_monitor: Arc<QueryPerformanceMonitor>,
    response_cache: Arc<ResponseCache>,
}

impl ExportMetricsUseCase {
    pub fn new(
        exporter: Arc<PrometheusExporter>,
        request_metrics: Arc<RequestMetricsCollector>,
        query_monitor: Arc<QueryPerformanceMonitor>,
        response_cache: Arc<ResponseCache>,
    ) -> Self {
        Self {
            exporter,
            request_metrics,
            query_monitor,
            response_cache,
        }
    }

    pub fn execute(&self) -> String {
        self.exporter.render(
            &self.request_metrics.snapshot(),
            &self.query_monitor.stats(),
            &self.response_cache.stats(),
        )
    }
}
