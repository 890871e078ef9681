//! Writer configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::pid::{DEFAULT_FIRST_PID, MAX_PID, MIN_PID};

/// Writer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// PID given to the first track without one
    pub first_pid: u16,

    /// Refuse track sets in which two tracks end up on the same PID
    pub check_duplicate_pids: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            first_pid: DEFAULT_FIRST_PID,
            check_duplicate_pids: true,
        }
    }
}

impl WriterConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(MIN_PID..=MAX_PID).contains(&self.first_pid) {
            return Err(ConfigurationError::InvalidConfig(format!(
                "first_pid {} outside {}..={}",
                self.first_pid, MIN_PID, MAX_PID
            )));
        }
        Ok(())
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigurationError> {
        let config: WriterConfig =
            toml::from_str(content).map_err(|e| ConfigurationError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigurationError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::InvalidConfig(format!("{}: {}", path, e)))?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
