pub mod motion_driver;
pub mod pages;

pub use motion_driver::{LandingNodes, MotionHandle};
