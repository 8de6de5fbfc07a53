pub mod engine;
pub mod shock;
