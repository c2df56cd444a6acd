use roster_schema::SchemaRegistry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `roster schema`: print one schema, or the registered names.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    match args.type_name.as_deref() {
        Some(name) => {
            let schema = registry.get(name).ok_or_else(|| {
                anyhow::anyhow!(
                    "unknown schema '{name}'; available: {}",
                    registry.list().join(", ")
                )
            })?;
            output(schema, flags.format)
        }
        None => output(&registry.list(), flags.format),
    }
}
