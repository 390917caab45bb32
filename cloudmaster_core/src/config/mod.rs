pub mod load;

// Config
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const CONFIG_DIR: &'static str = "/etc/cloudmaster";

/// Default refresh period of the live view, in milliseconds.
pub const DEFAULT_INTERVAL: u64 = 5_000;

/*
* The main cloudmaster cli configuration struct.
*/
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CloudmasterConfig {
    /// Base url of the cloud gateway. Cloud routes hang under it.
    pub api_url: String,
    /// Refresh period of the live view, in milliseconds.
    pub interval: Option<u64>,
}

impl CloudmasterConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval.unwrap_or(DEFAULT_INTERVAL))
    }
}
