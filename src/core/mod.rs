pub mod currency;
pub mod trade;
