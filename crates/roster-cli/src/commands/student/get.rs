use anyhow::Context;
use roster_core::entities::{Assignment, Staff, Student};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StudentDetailResponse {
    student: Student,
    assignment: Option<Assignment>,
    mentor: Option<Staff>,
}

/// Show one student with their active mentor, if any.
pub async fn run(index: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let student = ctx
        .service
        .get_student(index)
        .await?
        .with_context(|| format!("no student with index '{index}'"))?;
    let assignment = ctx.service.active_assignment(index).await?;
    let mentor = match &assignment {
        Some(assignment) => ctx.service.get_staff(&assignment.staff_id).await?,
        None => None,
    };
    output(
        &StudentDetailResponse {
            student,
            assignment,
            mentor,
        },
        flags.format,
    )
}
