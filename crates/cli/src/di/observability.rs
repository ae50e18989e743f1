use ferrous_watch_application::ports::{DatabasePort, ExternalStorePort};
use ferrous_watch_application::ObservabilityContext;
use ferrous_watch_domain::Config;
use ferrous_watch_infrastructure::{
    clock::SystemClock, database::SqliteDatabaseProbe, external_store::RedisStoreProbe,
    system::SysinfoResourceProbe,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

pub struct ObservabilityServices {
    pub context: ObservabilityContext,
    /// Same instrumented probe the health check uses.
    pub analysis_database: Arc<dyn DatabasePort>,
}

impl ObservabilityServices {
    pub fn new(config: &Config, pool: SqlitePool) -> anyhow::Result<Self> {
        let external_store: Option<Arc<dyn ExternalStorePort>> = match &config.external_store.url {
            Some(url) => {
                info!("External store health checks enabled");
                Some(Arc::new(RedisStoreProbe::new(url)?))
            }
            None => None,
        };

        let context = ObservabilityContext::with_database(
            config,
            Arc::new(SystemClock),
            Arc::new(SysinfoResourceProbe::new()),
            external_store,
            |monitor| -> Arc<dyn DatabasePort> {
                Arc::new(SqliteDatabaseProbe::new(pool).with_query_monitor(monitor))
            },
        );
        let analysis_database = context.database.clone();

        info!(
            cache_enabled = config.cache.enabled,
            cache_max_entries = config.cache.max_entries,
            rate_limit_max = config.rate_limit.max_requests,
            rate_limit_strict_max = config.rate_limit.strict_max_requests(),
            health_checks = context.health.check_names().len(),
            "Observability services ready"
        );

        Ok(Self {
            context,
            analysis_database,
        })
    }
}
