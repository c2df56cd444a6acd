mod get;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::StudentCommands;
use crate::context::AppContext;

/// Handle `roster student`.
pub async fn handle(action: &StudentCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        StudentCommands::List {
            department,
            unassigned,
            mentor,
        } => list::run(department.as_deref(), *unassigned, mentor.as_deref(), ctx, flags).await,
        StudentCommands::Get { index } => get::run(index, ctx, flags).await,
    }
}
