use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    tracing::debug!(root = %ctx.project_root.display(), ?command, "dispatch");
    match command {
        Commands::Upload(args) => commands::upload::handle(&args, ctx, flags).await,
        Commands::Preview(args) => commands::preview::handle(&args, ctx, flags).await,
        Commands::Staff { action } => commands::staff::handle(&action, ctx, flags).await,
        Commands::Student { action } => commands::student::handle(&action, ctx, flags).await,
        Commands::Pairing { action } => commands::pairing::handle(&action, ctx, flags).await,
        Commands::Init(_) | Commands::Schema(_) => {
            anyhow::bail!("init and schema run before the project context is opened")
        }
    }
}
