pub mod auth;
pub mod board;
pub mod rents;
pub mod spots;
