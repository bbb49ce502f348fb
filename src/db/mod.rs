pub mod connection;
pub mod rents;
pub mod spots;
pub mod users;
