use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Coordinator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Period of the timer pulse in milliseconds; `None` means pulses only
    /// arrive through [`crate::ArenaHandle::pulse`]
    pub pulse_interval_ms: Option<u64>,
    /// Capacity of the command mailbox
    pub command_buffer: usize,
    /// Emit a `TimerTick` event on every pulse, not just on expiry
    pub announce_ticks: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            pulse_interval_ms: Some(1000),
            command_buffer: 64,
            announce_ticks: true,
        }
    }
}

impl ArenaConfig {
    /// Config without an internal clock, for tests and replays
    pub fn manual_pulse() -> Self {
        Self {
            pulse_interval_ms: None,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse arena config")
    }

    pub fn pulse_interval(&self) -> Option<Duration> {
        self.pulse_interval_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ArenaConfig::default();
        assert_eq!(config.pulse_interval(), Some(Duration::from_secs(1)));
        assert_eq!(config.command_buffer, 64);
        assert!(config.announce_ticks);
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = ArenaConfig::from_json(r#"{ "pulse_interval_ms": 250 }"#).unwrap();
        assert_eq!(config.pulse_interval(), Some(Duration::from_millis(250)));
        assert_eq!(config.command_buffer, 64);
    }

    #[test]
    fn test_manual_pulse() {
        let config = ArenaConfig::from_json(r#"{ "pulse_interval_ms": null }"#).unwrap();
        assert_eq!(config.pulse_interval(), None);
        assert_eq!(ArenaConfig::manual_pulse().pulse_interval(), None);
    }

    #[test]
    fn test_zero_interval_disables_clock() {
        let config = ArenaConfig {
            pulse_interval_ms: Some(0),
            ..ArenaConfig::default()
        };
        assert_eq!(config.pulse_interval(), None);
    }

    #[test]
    fn test_invalid_json() {
        assert!(ArenaConfig::from_json("{ nope").is_err());
    }
}
