mod clock;
mod database_port;
mod external_store_port;
mod resource_probe;

pub use clock::Clock;
pub use database_port::{DatabasePort, TableStatistics};
pub use external_store_port::ExternalStorePort;
pub use resource_probe::{ProcessResources, ResourceProbe};
