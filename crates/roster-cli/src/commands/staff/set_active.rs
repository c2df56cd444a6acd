use anyhow::Context;
use roster_core::entities::Staff;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StaffActivationResponse {
    staff: Staff,
}

pub async fn run(id: &str, active: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let staff = ctx
        .service
        .set_staff_active(id, active)
        .await
        .with_context(|| format!("no staff member with id '{id}'"))?;
    output(&StaffActivationResponse { staff }, flags.format)
}
