//! ID prefix constants.
//!
//! Students are keyed by their externally supplied index number. Staff records
//! get a generated `stf-xxxxxxxx` id from the store that creates them.

/// Prefix for staff (allocator) ids.
pub const PREFIX_STAFF: &str = "stf";
