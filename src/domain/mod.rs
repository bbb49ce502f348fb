pub mod money;
pub mod payment;
pub mod pricing;
pub mod rent;
pub mod spot;
pub mod time;
