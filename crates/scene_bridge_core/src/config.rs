use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "tcp://localhost:5555";

#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub endpoint: String,
    /// Upper bound on the wait for one reply. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

impl SceneConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Reads `SCENE_ENDPOINT` and `SCENE_TIMEOUT_MS`. A timeout of `0` leaves
    /// the wait unbounded; an unparsable one is logged and ignored.
    pub fn from_env() -> Self {
        let endpoint =
            std::env::var("SCENE_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let timeout = std::env::var("SCENE_TIMEOUT_MS").ok().and_then(|v| match v.parse::<u64>() {
            Ok(ms) => timeout_from_millis(ms),
            Err(e) => {
                tracing::warn!("Ignoring SCENE_TIMEOUT_MS={:?}: {}", v, e);
                None
            }
        });

        Self { endpoint, timeout }
    }
}

pub fn timeout_from_millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}
