//! Core domain models and animation logic for the landing page

pub mod choreography;
#[cfg(feature = "ssr")]
pub mod config;
pub mod features;
pub mod motion;

pub use choreography::{HoverTarget, Host, LandingMotion, LandingTargets};
pub use features::{FEATURES, Feature};
