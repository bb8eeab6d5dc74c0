pub mod assets;
pub mod attendance;
