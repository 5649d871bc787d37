//! Parser configuration.

use std::str::FromStr;

use crate::domain::DEFAULT_NO_SERVICE_MARKER;

/// Environment variable overriding [`ParserConfig::no_service_marker`].
pub const NO_SERVICE_MARKER_VAR: &str = "TIMETABLE_NO_SERVICE_MARKER";

/// Environment variable overriding [`ParserConfig::leftovers`].
pub const LEFTOVERS_VAR: &str = "TIMETABLE_LEFTOVERS";

/// Error returned when a configuration value cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {variable}: expected one of ignore, warn, reject")]
    InvalidLeftoverPolicy {
        variable: &'static str,
        value: String,
    },

    #[error("{variable} must not be empty")]
    EmptyMarker { variable: &'static str },
}

/// What to do with blocks still stored after every transport line is linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeftoverPolicy {
    Ignore,
    /// Log a warning per store with leftovers.
    #[default]
    Warn,
    /// Fail the link with [`LinkError::LeftoverBlocks`](super::LinkError::LeftoverBlocks).
    Reject,
}

impl FromStr for LeftoverPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(LeftoverPolicy::Ignore),
            "warn" => Ok(LeftoverPolicy::Warn),
            "reject" => Ok(LeftoverPolicy::Reject),
            _ => Err(ConfigError::InvalidLeftoverPolicy {
                variable: LEFTOVERS_VAR,
                value: s.to_string(),
            }),
        }
    }
}

/// Configuration for a parse session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Substring marking a day-type line as having no service.
    pub no_service_marker: String,

    /// Handling of blocks left unlinked at the end of a session.
    pub leftovers: LeftoverPolicy,
}

impl ParserConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(no_service_marker: impl Into<String>, leftovers: LeftoverPolicy) -> Self {
        Self {
            no_service_marker: no_service_marker.into(),
            leftovers,
        }
    }

    /// Read overrides from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from a variable lookup, falling back to
    /// defaults for anything unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(marker) = lookup(NO_SERVICE_MARKER_VAR) {
            if marker.trim().is_empty() {
                return Err(ConfigError::EmptyMarker {
                    variable: NO_SERVICE_MARKER_VAR,
                });
            }
            config.no_service_marker = marker;
        }

        if let Some(policy) = lookup(LEFTOVERS_VAR) {
            config.leftovers = policy.parse()?;
        }

        Ok(config)
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            no_service_marker: DEFAULT_NO_SERVICE_MARKER.to_string(),
            leftovers: LeftoverPolicy::default(),
        }
    }
}
