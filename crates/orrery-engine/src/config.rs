//! Scheduler configuration.

use std::error::Error;
use std::fmt;
use std::time::Duration;

// ── ConfigError ──────────────────────────────────────────────────

/// Errors from scheduler configuration validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `update_interval_ms` is zero. The loop would never park and
    /// would spin at full speed between steps.
    ZeroInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroInterval => {
                write!(f, "update_interval_ms must be at least 1")
            }
        }
    }
}

impl Error for ConfigError {}

// ── SchedulerConfig ──────────────────────────────────────────────

/// Payload shape for scene-update events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ProtocolMode {
    /// Updates carry the flattened particle array. This is the
    /// default: the binary stream is the compact transport for
    /// particle-heavy scenes.
    #[default]
    Binary,
    /// Updates carry the textual scene snapshot.
    Text,
}

/// Configuration for one [`UpdateScheduler`](crate::UpdateScheduler).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Minimum milliseconds between two performed updates. The loop
    /// parks for the remainder of the interval between steps.
    pub update_interval_ms: u64,
    /// Payload shape for scene-update events.
    pub protocol: ProtocolMode,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: 100,
            protocol: ProtocolMode::Binary,
        }
    }
}

impl SchedulerConfig {
    /// Validate all structural invariants.
    ///
    /// Called by [`UpdateScheduler::spawn`](crate::UpdateScheduler::spawn)
    /// before the update thread is created.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. The cadence interval must pace the loop.
        if self.update_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }

    /// The minimum inter-update interval as a [`Duration`].
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SchedulerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = SchedulerConfig {
            update_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval));
    }
}
