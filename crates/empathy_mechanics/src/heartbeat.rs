//! Heartbeat configuration for the session driver
//!
//! The heartbeat sets how often a driven session ticks when nobody is
//! sending actions.

use empathy_core::SessionConfig;
use std::time::Duration;

/// Configuration for the session heartbeat
#[derive(Debug, Clone)]
pub struct HeartbeatConfig {
    /// How often to tick the session (default: 16ms, ~60 FPS)
    pub interval: Duration,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(16),
        }
    }
}

impl HeartbeatConfig {
    /// Interval from `[session] tick_interval_ms`. Zero is raised to 1ms.
    pub fn from_session(config: &SessionConfig) -> Self {
        if config.tick_interval_ms == 0 {
            tracing::warn!("tick_interval_ms = 0, using 1ms");
        }
        Self {
            interval: Duration::from_millis(config.tick_interval_ms.max(1)),
        }
    }

    /// Very fast heartbeat for testing
    pub fn testing() -> Self {
        Self {
            interval: Duration::from_millis(5),
        }
    }
}
