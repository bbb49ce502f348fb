pub mod accounts;
pub mod identity;
pub mod sessions;
pub mod token;
