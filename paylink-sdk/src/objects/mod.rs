pub mod currency;
pub mod refund;
pub mod transaction;
