//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the router's runtime behavior.
//!
//! ## Environment Variables
//!
//! ### `ROUTETRIE_SLOW_MATCH_US`
//!
//! Threshold, in microseconds, above which a successful match is logged as
//! slow at `warn` level instead of `debug`.
//!
//! Default: `1000` (1 ms)
//!
//! ## Usage
//!
//! ```rust
//! use routetrie::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Slow match threshold: {} us", config.slow_match_us);
//! ```

use std::env;

/// Environment variable holding the slow match threshold
pub const SLOW_MATCH_ENV: &str = "ROUTETRIE_SLOW_MATCH_US";

const DEFAULT_SLOW_MATCH_US: u64 = 1_000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Match duration above which a `warn` is emitted (default: 1000 us)
    pub slow_match_us: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            slow_match_us: DEFAULT_SLOW_MATCH_US,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_value(env::var(SLOW_MATCH_ENV).ok().as_deref())
    }

    fn from_value(value: Option<&str>) -> Self {
        let slow_match_us = value
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_SLOW_MATCH_US);
        RuntimeConfig { slow_match_us }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset_or_invalid() {
        assert_eq!(RuntimeConfig::from_value(None), RuntimeConfig::default());
        assert_eq!(RuntimeConfig::from_value(Some("soon")).slow_match_us, 1_000);
    }

    #[test]
    fn test_parses_decimal() {
        assert_eq!(RuntimeConfig::from_value(Some(" 250 ")).slow_match_us, 250);
    }
}
