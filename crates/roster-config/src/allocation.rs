//! Allocation trigger configuration.
//!
//! Uploads allocate mentors only when the batch is for the configured
//! academic year and semester (first year, first semester by default).

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_trigger_year() -> u16 {
    1
}

const fn default_trigger_semester() -> u8 {
    1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AllocationConfig {
    /// Admission year (year group) that triggers allocation.
    #[serde(default = "default_trigger_year")]
    pub trigger_year: u16,

    /// Semester that triggers allocation.
    #[serde(default = "default_trigger_semester")]
    pub trigger_semester: u8,
}

impl AllocationConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero year or semester.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trigger_year == 0 {
            return Err(ConfigError::InvalidValue {
                field: "allocation.trigger_year".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.trigger_semester == 0 {
            return Err(ConfigError::InvalidValue {
                field: "allocation.trigger_semester".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            trigger_year: default_trigger_year(),
            trigger_semester: default_trigger_semester(),
        }
    }
}
