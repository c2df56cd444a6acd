use roster_core::entities::Staff;
use roster_db::repos::staff::StaffFilter;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StaffListResponse {
    staff: Vec<Staff>,
}

pub async fn run(
    department: Option<&str>,
    active_only: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
    let filter = StaffFilter {
        department,
        active_only,
    };
    let staff = ctx.service.list_staff(&filter, limit).await?;
    output(&StaffListResponse { staff }, flags.format)
}
