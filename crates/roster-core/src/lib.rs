//! # roster-core
//!
//! Core types, name normalization, and store contracts for Roster.
//!
//! This crate provides the foundational types shared across all Roster crates:
//! - Entity structs for students, staff, and assignments
//! - The assignment status enum
//! - The record normalizer that turns raw roster names into name parts
//! - Validated upload rows and per-row rejection outcomes
//! - Store traits (`StudentStore`, `AssignmentStore`, `AllocatorDirectory`)
//!   implemented by `roster-db` and the in-memory store in `roster-engine`
//! - Report and query response types

pub mod entities;
pub mod enums;
pub mod ids;
pub mod names;
pub mod responses;
pub mod rows;
pub mod store;
