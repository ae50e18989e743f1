use std::collections::HashMap;
use std::str::FromStr;

use tracing::warn;

use super::root::Config;

/// Environment-variable overrides, captured once at startup.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    vars: HashMap<String, String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self::from_pairs(std::env::vars())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn apply(&self, config: &mut Config) {
        self.set("PORT", &mut config.server.port);
        self.set_string("BIND_ADDRESS", &mut config.server.bind_address);
        self.set("SERVER_TIMEOUT", &mut config.server.request_timeout_ms);
        self.set("SLOW_REQUEST_THRESHOLD", &mut config.server.slow_request_threshold_ms);
        self.set("TRUST_PROXY", &mut config.server.trust_proxy);

        self.set("CACHE_ENABLED", &mut config.cache.enabled);
        self.set("CACHE_TTL", &mut config.cache.default_ttl_secs);
        self.set("CACHE_MAX_ENTRIES", &mut config.cache.max_entries);

        self.set(
            "SLOW_QUERY_THRESHOLD",
            &mut config.monitoring.slow_query_threshold_ms,
        );

        self.set("RATE_LIMIT_WINDOW_MS", &mut config.rate_limit.window_ms);
        self.set("RATE_LIMIT_MAX_REQUESTS", &mut config.rate_limit.max_requests);
        self.set(
            "SLOW_DOWN_WINDOW_MS",
            &mut config.rate_limit.slow_down_window_ms,
        );
        self.set(
            "SLOW_DOWN_DELAY_AFTER",
            &mut config.rate_limit.slow_down_delay_after,
        );
        self.set("SLOW_DOWN_DELAY_MS", &mut config.rate_limit.slow_down_delay_ms);

        self.set_string("DATABASE_URL", &mut config.database.path);
        self.set("DB_TIMEOUT", &mut config.database.timeout_ms);

        if let Some(url) = self.get("REDIS_URL") {
            config.external_store.url = if url.is_empty() {
                None
            } else {
                Some(url.to_string())
            };
        }

        self.set("COMPRESSION_ENABLED", &mut config.compression.enabled);
        self.set("COMPRESSION_THRESHOLD", &mut config.compression.threshold);
        self.set("COMPRESSION_LEVEL", &mut config.compression.level);

        self.set_string("LOG_LEVEL", &mut config.logging.level);
        self.set_string("LOG_FORMAT", &mut config.logging.format);
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(|v| v.trim())
    }

    fn set<T: FromStr>(&self, key: &str, target: &mut T) {
        let Some(raw) = self.get(key) else {
            return;
        };
        match raw.parse::<T>() {
            Ok(value) => *target = value,
            Err(_) => warn!(variable = key, value = raw, "Ignoring unparseable environment override"),
        }
    }

    fn set_string(&self, key: &str, target: &mut String) {
        if let Some(raw) = self.get(key) {
            if !raw.is_empty() {
                *target = raw.to_string();
            }
        }
    }
}
