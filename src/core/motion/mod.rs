//! Declarative animation engine
//!
//! A small tween/timeline engine with scroll-linked triggers, sized for the
//! landing page's needs:
//!
//! - immediate property assignment ([`Engine::set`])
//! - interpolated tweens with duration, easing, delay and repeat
//! - timelines that overlap children via relative offsets
//! - scroll triggers that scrub or toggle their animation
//! - a registry that can be queried and released per [`Scope`]
//!
//! The engine is pure state; a host drives it by calling [`Engine::tick`] once
//! per frame and feeding scroll geometry, then writes
//! [`Engine::take_dirty`] back to the page.
//!
//! # Example
//!
//! ```rust
//! use runakuna::core::motion::{Ease, Engine, Position, TargetId, Timeline, Tween, Vars};
//!
//! let nav = TargetId(1);
//! let card = TargetId(2);
//! let mut engine = Engine::new();
//!
//! engine.set(nav, &Vars::new().opacity(0.0));
//! engine.set(card, &Vars::new().opacity(0.0));
//! engine.timeline(
//!     Timeline::new()
//!         .to(nav, Tween::new(Vars::new().opacity(1.0), 0.6), Position::End)
//!         .to(card, Tween::new(Vars::new().opacity(1.0), 1.0).ease(Ease::POWER3_OUT), "-=0.3".parse().unwrap()),
//! );
//! engine.tick(2.0);
//! assert_eq!(engine.transform(card).opacity, 1.0);
//! ```

mod ease;
mod engine;
mod props;
mod scope;
mod trigger;
mod tween;

use derive_more::{Display, From};

pub use ease::{Ease, EaseDirection};
pub use engine::{Engine, Viewport};
pub use props::{Prop, PropSet, Transform, Vars};
pub use scope::Scope;
pub use trigger::{
    Bounds, Crossing, Edge, ScrollTrigger, Threshold, ToggleAction, ToggleActions, TriggerMode,
};
pub use tween::{Position, Repeat, Timeline, Tween};

/// Identifies an animatable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[display("target#{_0}")]
pub struct TargetId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("animation#{_0}")]
pub struct AnimationId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("trigger#{_0}")]
pub struct TriggerId(u64);

/// Anything a [`Scope`] can own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
pub enum Handle {
    Animation(AnimationId),
    Trigger(TriggerId),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MotionError {
    #[error("Unknown ease: {0}")]
    UnknownEase(String),

    #[error("Invalid timeline position: {0}")]
    InvalidPosition(String),

    #[error("Invalid scroll threshold: {0}")]
    InvalidThreshold(String),

    #[error("Unknown toggle action: {0}")]
    UnknownToggleAction(String),
}
