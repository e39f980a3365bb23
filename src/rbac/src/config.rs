//! Resolver configuration loading and validation

use crate::error::{RbacError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Permission resolver configuration
///
/// ```toml
/// initial_capacity = 4096
/// shard_amount = 128
/// trace_checks = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Records to pre-allocate room for
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,

    /// Number of independently locked shards in the record cache.
    /// Must be a power of two greater than one.
    #[serde(default = "default_shard_amount")]
    pub shard_amount: usize,

    /// Emit a `trace` event for every user-id addressed check
    #[serde(default)]
    pub trace_checks: bool,
}

fn default_initial_capacity() -> usize { 1024 }
fn default_shard_amount() -> usize { 64 }

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            initial_capacity: default_initial_capacity(),
            shard_amount: default_shard_amount(),
            trace_checks: false,
        }
    }
}

impl ResolverConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: ResolverConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.shard_amount <= 1 || !self.shard_amount.is_power_of_two() {
            return Err(RbacError::InvalidConfig(format!(
                "shard_amount must be a power of two greater than 1, got {}",
                self.shard_amount
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ResolverConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ResolverConfig::from_toml_str("shard_amount = 16").unwrap();
        assert_eq!(config.shard_amount, 16);
        assert_eq!(config.initial_capacity, 1024);
        assert!(!config.trace_checks);

        let config = ResolverConfig::from_toml_str("").unwrap();
        assert_eq!(config, ResolverConfig::default());
    }

    #[test]
    fn test_invalid_shard_amount() {
        for bad in ["shard_amount = 0", "shard_amount = 1", "shard_amount = 48"] {
            let err = ResolverConfig::from_toml_str(bad).unwrap_err();
            assert!(matches!(err, RbacError::InvalidConfig(_)), "{bad}");
        }
    }

    #[test]
    fn test_malformed_toml() {
        let err = ResolverConfig::from_toml_str("shard_amount = \"many\"").unwrap_err();
        assert!(matches!(err, RbacError::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "initial_capacity = 10\ntrace_checks = true").unwrap();

        let config = ResolverConfig::load(file.path()).unwrap();
        assert_eq!(config.initial_capacity, 10);
        assert!(config.trace_checks);

        let missing = ResolverConfig::load("/nonexistent/rbac.toml").unwrap_err();
        assert!(matches!(missing, RbacError::Io(_)));
    }
}
