//! Driver configuration structures and loaders.
use std::env;

/// Initial state of a [`Driver`](crate::Driver).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriverConfig {
    /// Global scale applied to frame deltas unless an action opts out.
    pub time_dilation: f32,
    /// Start with the whole driver paused (ticks are no-ops).
    pub start_paused: bool,
    /// Start with the host simulation paused.
    pub host_paused: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            time_dilation: 1.0,
            start_paused: false,
            host_paused: false,
        }
    }
}

impl DriverConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `FLOW_TIME_DILATION` - Global time dilation (default: 1.0)
    /// - `FLOW_START_PAUSED` - Start with the driver paused (default: false)
    /// - `FLOW_HOST_PAUSED` - Start with the host simulation paused (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dilation) = read_env::<f32>("FLOW_TIME_DILATION") {
            config.time_dilation = dilation.max(0.0);
        }

        if let Some(paused) = read_env::<bool>("FLOW_START_PAUSED") {
            config.start_paused = paused;
        } else if env::var("FLOW_START_PAUSED").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.start_paused = true;
        }

        if let Some(paused) = read_env::<bool>("FLOW_HOST_PAUSED") {
            config.host_paused = paused;
        }

        config
    }
}

pub fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
