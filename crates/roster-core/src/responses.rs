//! Response types returned by the pipeline and by `roster` commands.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Student;

/// Summary of one upload run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub students_upserted: usize,
    pub students_failed: usize,
    pub pairings_created: usize,
    pub pairings_failed: usize,
    pub allocation_triggered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Set when allocation was triggered but could not run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
    pub message: String,
}

impl BatchReport {
    /// Any item-level failure in either phase.
    #[must_use]
    pub const fn is_partial_failure(&self) -> bool {
        self.students_failed > 0 || self.pairings_failed > 0
    }

    /// Whether this run produced pairings, as opposed to a students-only update.
    #[must_use]
    pub const fn created_pairings(&self) -> bool {
        self.pairings_created > 0
    }
}

/// A student together with their active assignment, as seen by the mentor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MenteeView {
    pub external_index: String,
    pub given_name: String,
    pub family_name: String,
    pub score: Option<f64>,
    pub admission_year: u16,
    /// Current academic level.
    pub level: u16,
    pub assigned_at: DateTime<Utc>,
}

impl MenteeView {
    #[must_use]
    pub fn new(student: &Student, assigned_at: DateTime<Utc>, current_year: i32) -> Self {
        Self {
            external_index: student.external_index.clone(),
            given_name: student.given_name.clone(),
            family_name: student.family_name.clone(),
            score: student.score,
            admission_year: student.admission_year,
            level: academic_level(student.admission_year, current_year),
            assigned_at,
        }
    }
}

/// Mentor label shown for a student with no active assignment.
pub const UNASSIGNED: &str = "Unassigned";

/// A student row in a directory listing, with their active mentor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StudentWithMentor {
    #[serde(flatten)]
    pub student: Student,
    pub mentor_id: Option<String>,
    /// Mentor display name, or [`UNASSIGNED`].
    pub mentor: String,
}

impl StudentWithMentor {
    #[must_use]
    pub fn new(student: Student, mentor: Option<(String, String)>) -> Self {
        match mentor {
            Some((id, name)) => Self {
                student,
                mentor_id: Some(id),
                mentor: name,
            },
            None => Self {
                student,
                mentor_id: None,
                mentor: UNASSIGNED.to_string(),
            },
        }
    }

    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.mentor_id.is_some()
    }
}

/// Academic level for an admission year.
///
/// Uploads carry either a calendar year (`2023`) or a year group (`1`..`4`).
/// Calendar years are converted to `current - admission + 1`, floored at 1.
#[must_use]
pub fn academic_level(admission_year: u16, current_year: i32) -> u16 {
    if admission_year <= 1000 {
        return admission_year.max(1);
    }
    let level = current_year - i32::from(admission_year) + 1;
    u16::try_from(level.max(1)).unwrap_or(u16::MAX)
}

/// Mentee count and aggregate score held by one allocator after a run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocatorLoad {
    pub staff_id: String,
    pub staff_name: String,
    pub mentees: usize,
    pub total_score: f64,
}
