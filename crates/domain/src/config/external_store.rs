use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExternalStoreConfig {
    /// Redis URL, e.g. `redis://127.0.0.1:6379`. Unset disables the store check.
    #[serde(default)]
    pub url: Option<String>,
}
