pub mod asset;
pub mod attendance;
pub mod dashboard;
pub mod exchange;
