mod add;
mod import;
mod list;
mod set_active;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::StaffCommands;
use crate::context::AppContext;

/// Handle `roster staff`.
pub async fn handle(action: &StaffCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        StaffCommands::Add {
            given_name,
            family_name,
            department,
            email,
            inactive,
        } => {
            add::run(
                given_name,
                family_name,
                department,
                email.as_deref(),
                !inactive,
                ctx,
                flags,
            )
            .await
        }
        StaffCommands::Import { file } => import::run(file, ctx, flags).await,
        StaffCommands::List { department, active } => {
            list::run(department.as_deref(), *active, ctx, flags).await
        }
        StaffCommands::Activate { id } => set_active::run(id, true, ctx, flags).await,
        StaffCommands::Deactivate { id } => set_active::run(id, false, ctx, flags).await,
    }
}
