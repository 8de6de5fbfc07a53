pub mod automation;
pub mod paths;
pub mod xlsx;
