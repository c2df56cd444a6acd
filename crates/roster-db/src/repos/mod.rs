//! Repository modules. Each adds methods to `RosterService` via an
//! `impl RosterService` block.

pub mod assignment;
pub mod staff;
pub mod student;
