//! # roster-engine
//!
//! The mentee allocation pipeline.
//!
//! - [`ingest::RosterIngestor`] upserts students from validated upload rows
//! - [`allocation::allocate`] ranks students and deals them across staff in
//!   alternating ("snake") order
//! - [`persist::PairingPersister`] upserts the resulting assignments, and
//!   [`persist::assign_to_staff`] does the same for a hand-picked set
//! - [`coordinator::BatchCoordinator`] runs one upload end to end and reports
//! - [`policy::TriggerPolicy`] decides whether a batch allocates at all
//!
//! Storage is injected through the `roster-core` store traits. Every per-row
//! and per-pair failure is isolated and counted; only a structurally empty
//! batch aborts a run.

pub mod allocation;
pub mod coordinator;
mod error;
pub mod ingest;
pub mod memory;
pub mod persist;
pub mod policy;
pub mod queries;
pub mod stats;

pub use error::EngineError;

use serde::Serialize;
use roster_core::store::StoreError;
use schemars::JsonSchema;

/// Category of a skipped row or pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The row failed schema validation.
    Validation,
    /// Storage rejected the upsert.
    Conflict,
    /// Storage could not be reached for this item.
    Unavailable,
}

impl From<&StoreError> for FailureKind {
    fn from(error: &StoreError) -> Self {
        if error.is_item_level() {
            Self::Conflict
        } else {
            Self::Unavailable
        }
    }
}

/// One skipped row or pair, with the key it was about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ItemFailure {
    pub key: Option<String>,
    pub kind: FailureKind,
    pub reason: String,
}
