use thiserror::Error;

/// Errors raised while loading the layered roster configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load roster config: {0}")]
    Load(#[from] figment::Error),

    /// A value parsed but is outside the accepted range.
    #[error("{field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
