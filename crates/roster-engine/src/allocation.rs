//! Bidirectional round-robin ("snake") allocation.
//!
//! Students are ranked by score, cut into passes of one student per allocator,
//! and dealt forward on even passes and backward on odd passes:
//!
//! ```text
//! pass 0:  A  B  C      90 85 80
//! pass 1:  C  B  A      75 70 65
//! pass 2:  A  B  C      60 ...
//! ```
//!
//! Alternating direction keeps the allocator that took the best student of one
//! pass from also taking the best remaining student of the next.

use std::collections::HashMap;

use roster_core::entities::{Staff, Student};
use roster_core::responses::AllocatorLoad;
use schemars::JsonSchema;
use serde::Serialize;

use crate::error::EngineError;

/// Anything that can be ranked for allocation.
pub trait Ranked {
    fn ranking_score(&self) -> f64;
}

impl Ranked for Student {
    fn ranking_score(&self) -> f64 {
        Self::ranking_score(self)
    }
}

/// One student dealt to one allocator.
#[derive(Debug)]
pub struct Pairing<'a, S, A> {
    pub student: &'a S,
    pub allocator: &'a A,
    /// Zero-based pass number; odd passes run in reverse allocator order.
    pub pass: usize,
    /// Position within the pass.
    pub position: usize,
}

/// Allocator index for `position` within `pass`, given `m` allocators.
#[must_use]
pub const fn slot(pass: usize, position: usize, m: usize) -> usize {
    if pass % 2 == 0 {
        position
    } else {
        m - 1 - position
    }
}

/// Deal `students` across `allocators` in snake order.
///
/// The sort is stable, so students with equal scores keep their input order,
/// and identical inputs always produce identical output.
///
/// # Errors
///
/// Returns `EngineError::NoEligibleAllocators` when `allocators` is empty and
/// there is at least one student. An empty student list is not an error.
pub fn allocate<'a, S: Ranked, A>(
    students: &'a [S],
    allocators: &'a [A],
) -> Result<Vec<Pairing<'a, S, A>>, EngineError> {
    if students.is_empty() {
        return Ok(Vec::new());
    }
    if allocators.is_empty() {
        return Err(EngineError::NoEligibleAllocators { department: None });
    }

    let mut ranked: Vec<&S> = students.iter().collect();
    ranked.sort_by(|a, b| b.ranking_score().total_cmp(&a.ranking_score()));

    let m = allocators.len();
    let pairings = ranked
        .chunks(m)
        .enumerate()
        .flat_map(|(pass, chunk)| {
            chunk.iter().enumerate().map(move |(position, student)| Pairing {
                student: *student,
                allocator: &allocators[slot(pass, position, m)],
                pass,
                position,
            })
        })
        .collect();
    Ok(pairings)
}

/// Per-allocator totals for one allocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSummary {
    /// One entry per allocator in directory order, including allocators that
    /// received nobody.
    pub loads: Vec<AllocatorLoad>,
}

impl AllocationSummary {
    #[must_use]
    pub fn from_pairings(allocators: &[Staff], pairings: &[Pairing<'_, Student, Staff>]) -> Self {
        let mut loads: Vec<AllocatorLoad> = allocators
            .iter()
            .map(|staff| AllocatorLoad {
                staff_id: staff.id.clone(),
                staff_name: staff.display_name(),
                mentees: 0,
                total_score: 0.0,
            })
            .collect();
        let by_id: HashMap<&str, usize> = allocators
            .iter()
            .enumerate()
            .map(|(idx, staff)| (staff.id.as_str(), idx))
            .collect();

        for pairing in pairings {
            if let Some(&idx) = by_id.get(pairing.allocator.id.as_str()) {
                loads[idx].mentees += 1;
                loads[idx].total_score += pairing.student.ranking_score();
            }
        }
        Self { loads }
    }

    /// Largest difference in mentee count between any two allocators.
    #[must_use]
    pub fn spread(&self) -> usize {
        let max = self.loads.iter().map(|l| l.mentees).max().unwrap_or(0);
        let min = self.loads.iter().map(|l| l.mentees).min().unwrap_or(0);
        max - min
    }
}
