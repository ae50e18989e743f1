use super::query_monitor::QueryStatsSnapshot;
use super::request_metrics::RequestMetricsSnapshot;
use super::response_cache::ResponseCacheStats;
use std::fmt::Display;
use std::fmt::Write;

/// Renders collector snapshots in the Prometheus text exposition format.
///
/// Rendering only reads the snapshots it is given; it never touches the
/// collectors themselves.
#[derive(Debug, Clone, Default)]
pub struct PrometheusExporter {
    prefix: String,
}

impl PrometheusExporter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn render(
        &self,
        requests: &RequestMetricsSnapshot,
        queries: &QueryStatsSnapshot,
        cache: &ResponseCacheStats,
    ) -> String {
        let mut out = String::with_capacity(2048);

        self.write_counter(
            &mut out,
            "http_requests_total",
            "Total number of HTTP requests",
            requests.total_requests,
        );
        self.write_counter(
            &mut out,
            "http_request_errors_total",
            "Total number of HTTP responses with status >= 400",
            requests.total_errors,
        );
        self.write_gauge(
            &mut out,
            "http_request_duration_ms",
            "Average HTTP request duration in milliseconds",
            format_float(requests.average_response_time_ms),
        );
        self.write_counter(
            &mut out,
            "database_queries_total",
            "Total number of database queries",
            queries.total_queries,
        );
        self.write_counter(
            &mut out,
            "database_slow_queries_total",
            "Total number of database queries above the slow threshold",
            queries.slow_queries,
        );
        self.write_gauge(
            &mut out,
            "database_query_duration_ms",
            "Average database query duration in milliseconds",
            format_float(queries.average_duration_ms),
        );
        self.write_counter(
            &mut out,
            "response_cache_hits_total",
            "Response cache hits",
            cache.hits,
        );
        self.write_counter(
            &mut out,
            "response_cache_misses_total",
            "Response cache misses",
            cache.misses,
        );
        self.write_gauge(
            &mut out,
            "response_cache_entries",
            "Entries currently held in the response cache",
            cache.entries,
        );
        self.write_gauge(
            &mut out,
            "process_memory_usage_bytes",
            "Resident memory of the process in bytes",
            requests.system.memory_used_bytes,
        );
        self.write_gauge(
            &mut out,
            "process_uptime_seconds",
            "Process uptime in seconds",
            requests.system.uptime_seconds,
        );

        out
    }

    fn write_counter(&self, out: &mut String, name: &str, help: &str, value: impl Display) {
        self.write_metric(out, name, help, "counter", value);
    }

    fn write_gauge(&self, out: &mut String, name: &str, help: &str, value: impl Display) {
        self.write_metric(out, name, help, "gauge", value);
    }

    fn write_metric(&self, out: &mut String, name: &str, help: &str, kind: &str, value: impl Display) {
        let name = self.metric_name(name);
        let _ = writeln!(out, "# HELP {} {}", name, help);
        let _ = writeln!(out, "# TYPE {} {}", name, kind);
        let _ = writeln!(out, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

fn format_float(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        "0".to_string()
    }
}
