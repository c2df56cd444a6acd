mod pairing;
mod staff;
mod student;

pub use pairing::PairingCommands;
pub use staff::StaffCommands;
pub use student::StudentCommands;
