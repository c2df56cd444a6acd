use roster_core::entities::{NewStaff, Staff};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StaffAddResponse {
    staff: Staff,
}

pub async fn run(
    given_name: &str,
    family_name: &str,
    department: &str,
    email: Option<&str>,
    active: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let staff = ctx
        .service
        .add_staff(&NewStaff {
            given_name: given_name.to_string(),
            family_name: family_name.to_string(),
            email: email.map(String::from),
            department: department.to_string(),
            active,
        })
        .await?;
    output(&StaffAddResponse { staff }, flags.format)
}
