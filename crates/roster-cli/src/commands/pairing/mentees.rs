use anyhow::Context;
use roster_core::entities::Staff;
use roster_core::responses::MenteeView;
use roster_engine::queries::mentees_for;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct MenteesResponse {
    staff: Staff,
    mentees: Vec<MenteeView>,
}

pub async fn run(staff_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let staff = ctx
        .service
        .get_staff(staff_id)
        .await?
        .with_context(|| format!("no staff member with id '{staff_id}'"))?;
    let mentees = mentees_for(&ctx.service, &ctx.service, &ctx.service, staff_id).await?;
    output(&MenteesResponse { staff, mentees }, flags.format)
}
