use std::env;
use std::time::Duration;

const DEFAULT_REQUEUE_SECONDS: u64 = 300;
const DEFAULT_ERROR_REQUEUE_SECONDS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorConfig {
    pub log_level: Option<String>,
    /// `None` watches every namespace.
    pub watch_namespace: Option<String>,
    pub requeue_interval: Duration,
    pub error_requeue_interval: Duration,
}

impl OperatorConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let seconds = |key: &str, default: u64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        OperatorConfig {
            log_level: lookup("LOG_LEVEL").map(|v| v.to_lowercase()),
            watch_namespace: lookup("WATCH_NAMESPACE").filter(|ns| !ns.is_empty()),
            requeue_interval: Duration::from_secs(seconds(
                "REQUEUE_SECONDS",
                DEFAULT_REQUEUE_SECONDS,
            )),
            error_requeue_interval: Duration::from_secs(seconds(
                "ERROR_REQUEUE_SECONDS",
                DEFAULT_ERROR_REQUEUE_SECONDS,
            )),
        }
    }
}
