use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AssignmentStatus;

/// The current mentor relationship for one student.
///
/// Keyed by `student_index`: re-allocation overwrites `staff_id`, `status`, and
/// both timestamps instead of adding a second row.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Assignment {
    pub student_index: String,
    pub staff_id: String,
    pub status: AssignmentStatus,
    pub assigned_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
