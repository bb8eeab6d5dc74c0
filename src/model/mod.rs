pub mod asset;
pub mod attendance;
pub mod role;
