pub mod camera;
pub mod catalog;
pub mod core;
pub mod scene;
pub mod systems;
pub mod units;
