//! Entity structs for all Roster domain objects.
//!
//! Each entity maps to a table in the libSQL database (see `roster-db`).
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! output and schema export.

mod assignment;
mod staff;
mod student;

pub use assignment::Assignment;
pub use staff::{NewStaff, Staff};
pub use student::{NewStudent, Student};
