use roster_core::responses::StudentWithMentor;
use roster_db::repos::student::MentorFilter;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StudentListResponse {
    total: u64,
    students: Vec<StudentWithMentor>,
}

pub async fn run(
    department: Option<&str>,
    unassigned: bool,
    mentor: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
    let filter = mentor_filter(unassigned, mentor);
    let students = ctx
        .service
        .list_students_with_mentors(department, &filter, limit)
        .await?;
    let total = ctx.service.count_students().await?;
    output(&StudentListResponse { total, students }, flags.format)
}

fn mentor_filter(unassigned: bool, mentor: Option<&str>) -> MentorFilter {
    match mentor {
        Some(staff_id) => MentorFilter::Staff(staff_id.to_string()),
        None if unassigned => MentorFilter::Unassigned,
        None => MentorFilter::Any,
    }
}
