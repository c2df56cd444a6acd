//! Central schema registry for all Roster types.
//!
//! The `SchemaRegistry` builds JSON Schemas from roster-core types at
//! construction time using [`schemars::schema_for!`] and provides validation
//! via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Name of the upload row schema.
pub const ROSTER_ROW: &str = "roster_row";

/// Central store of all JSON Schemas in the Roster system.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert the generated schema for `$ty` under `$name`.
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, schema_for!($ty).to_value());
    };
}

impl SchemaRegistry {
    /// Build a registry containing the upload, entity, and report schemas.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Upload input (3) ---
        register!(schemas, ROSTER_ROW, roster_core::rows::RosterRow);
        register!(schemas, "batch_meta", roster_core::rows::BatchMeta);
        register!(schemas, "new_staff", roster_core::entities::NewStaff);

        // --- Entities (4) ---
        register!(schemas, "student", roster_core::entities::Student);
        register!(schemas, "new_student", roster_core::entities::NewStudent);
        register!(schemas, "staff", roster_core::entities::Staff);
        register!(schemas, "assignment", roster_core::entities::Assignment);

        // --- Outputs (5) ---
        register!(schemas, "batch_report", roster_core::responses::BatchReport);
        register!(schemas, "mentee_view", roster_core::responses::MenteeView);
        register!(schemas, "allocator_load", roster_core::responses::AllocatorLoad);
        register!(schemas, "row_rejection", roster_core::rows::RowRejection);
        register!(schemas, "name_parts", roster_core::names::NameParts);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Compile a named schema into a reusable validator.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnknownSchema` for an unknown name, or
    /// `SchemaError::Compile` if the schema does not compile.
    pub fn compile(&self, name: &str) -> Result<jsonschema::Validator, SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::UnknownSchema(name.to_string()))?;
        jsonschema::validator_for(schema).map_err(|e| SchemaError::Compile {
            schema: name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnknownSchema` if the schema name is unknown, or
    /// `SchemaError::Invalid` listing every violation.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let validator = self.compile(name)?;
        check(name, &validator, instance)
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a compiled validator and collect its error messages.
pub(crate) fn check(
    schema: &str,
    validator: &jsonschema::Validator,
    instance: &serde_json::Value,
) -> Result<(), SchemaError> {
    let errors: Vec<String> = validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::Invalid {
            schema: schema.to_string(),
            errors,
        })
    }
}
