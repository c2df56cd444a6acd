pub mod dispatch;
pub mod init;
pub mod pairing;
pub mod preview;
pub mod schema;
pub mod shared;
pub mod staff;
pub mod student;
pub mod upload;
