//! Per-machine configuration.
//!
//! Configuration only tunes diagnostics (naming and the size of the
//! transition log). It never changes evaluation semantics.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of state changes retained by a machine's log.
pub const DEFAULT_HISTORY_CAPACITY: usize = 32;

/// Default machine name used in logs.
pub const DEFAULT_MACHINE_NAME: &str = "state-machine";

/// Errors raised while loading a [`MachineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document was not valid JSON or had the wrong shape
    #[error("Failed to parse machine config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for a single state machine.
///
/// # Example
///
/// ```rust
/// use demeanor::config::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "name": "guard-7" }"#).unwrap();
/// assert_eq!(config.name, "guard-7");
/// assert_eq!(config.history_capacity, 32);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MachineConfig {
    /// Label attached to every log event the machine emits
    pub name: String,

    /// Number of state changes kept in the transition log (0 disables it)
    pub history_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MACHINE_NAME.to_string(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl MachineConfig {
    /// Default configuration with a custom name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_applied() {
        let config = MachineConfig::default();
        assert_eq!(config.name, DEFAULT_MACHINE_NAME);
        assert_eq!(config.history_capacity, DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = MachineConfig::from_json("{}").unwrap();
        assert_eq!(config, MachineConfig::default());
    }

    #[test]
    fn all_fields_parse() {
        let config =
            MachineConfig::from_json(r#"{ "name": "npc-12", "history_capacity": 0 }"#).unwrap();
        assert_eq!(config.name, "npc-12");
        assert_eq!(config.history_capacity, 0);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = MachineConfig::from_json(r#"{ "tick_rate": 60 }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = MachineConfig::from_json("name = 'x'");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn fluent_setters() {
        let config = MachineConfig::named("walker").history_capacity(4);
        assert_eq!(config.name, "walker");
        assert_eq!(config.history_capacity, 4);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = MachineConfig::named("walker").history_capacity(4);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(MachineConfig::from_json(&json).unwrap(), config);
    }
}
