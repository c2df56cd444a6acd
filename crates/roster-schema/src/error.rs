use thiserror::Error;

/// Errors from the schema registry and row validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unknown schema '{0}'")]
    UnknownSchema(String),

    /// The instance broke one or more rules of the named schema.
    #[error("{schema} rejected: {}", errors.join("; "))]
    Invalid { schema: String, errors: Vec<String> },

    #[error("schema '{schema}' does not compile: {reason}")]
    Compile { schema: String, reason: String },
}
