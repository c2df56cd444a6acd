//! Listing defaults shared by the read commands.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Rows returned by `staff list` and `student list` when `--limit` is absent.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl GeneralConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_limit_is_rejected() {
        let config = GeneralConfig { default_limit: 0 };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "general.default_limit"
        ));
        assert!(GeneralConfig::default().validate().is_ok());
    }
}
