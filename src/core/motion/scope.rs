//! Ownership of engine handles for one component instance.
//!
//! Everything a component creates goes through its `Scope`, and `release`
//! disposes exactly those handles. Animations and triggers that belong to
//! other scopes are never touched.

use super::engine::Engine;
use super::props::Vars;
use super::trigger::ScrollTrigger;
use super::tween::{Timeline, Tween};
use super::{AnimationId, Handle, TargetId, TriggerId};

#[derive(Debug, Default)]
pub struct Scope {
    handles: Vec<Handle>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to(&mut self, engine: &mut Engine, target: TargetId, tween: Tween) -> AnimationId {
        let id = engine.to(target, tween);
        self.adopt(engine, id)
    }

    pub fn from_to(
        &mut self,
        engine: &mut Engine,
        target: TargetId,
        from: Vars,
        tween: Tween,
    ) -> AnimationId {
        let id = engine.from_to(target, from, tween);
        self.adopt(engine, id)
    }

    pub fn timeline(&mut self, engine: &mut Engine, timeline: Timeline) -> AnimationId {
        let id = engine.timeline(timeline);
        self.adopt(engine, id)
    }

    pub fn scroll_trigger(
        &mut self,
        engine: &mut Engine,
        config: ScrollTrigger,
        animation: AnimationId,
    ) -> TriggerId {
        let id = engine.scroll_trigger(config, animation);
        self.adopt(engine, id)
    }

    /// Takes ownership of a handle created directly on the engine.
    ///
    /// Handles the engine has already dropped are pruned on the way.
    pub fn adopt<H: Into<Handle> + Copy>(&mut self, engine: &Engine, handle: H) -> H {
        self.handles.retain(|h| is_live(engine, *h));
        self.handles.push(handle.into());
        handle
    }

    /// Number of handles still registered with the engine.
    pub fn live(&self, engine: &Engine) -> usize {
        self.handles.iter().filter(|h| is_live(engine, **h)).count()
    }

    /// Kills every trigger and animation this scope created.
    ///
    /// Triggers go first so none of them fires against a dead animation.
    /// Returns how many handles were still live.
    pub fn release(&mut self, engine: &mut Engine) -> usize {
        let handles = std::mem::take(&mut self.handles);
        let mut released = 0;
        for handle in &handles {
            if let Handle::Trigger(id) = handle {
                released += usize::from(engine.kill_trigger(*id));
            }
        }
        for handle in &handles {
            if let Handle::Animation(id) = handle {
                released += usize::from(engine.kill_animation(*id));
            }
        }
        tracing::debug!(released, "released motion scope");
        released
    }
}

fn is_live(engine: &Engine, handle: Handle) -> bool {
    match handle {
        Handle::Animation(id) => engine.contains_animation(id),
        Handle::Trigger(id) => engine.contains_trigger(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::motion::Repeat;

    const CIRCLE: TargetId = TargetId(10);
    const SIBLING: TargetId = TargetId(20);

    fn spin() -> Tween {
        Tween::new(Vars::new().rotation(360.0), 8.0).repeat(Repeat::Infinite)
    }

    #[test]
    fn test_release_only_touches_own_handles() {
        let mut engine = Engine::new();
        let mut mine = Scope::new();
        let mut theirs = Scope::new();

        mine.to(&mut engine, CIRCLE, spin());
        let sibling = theirs.to(&mut engine, SIBLING, spin());
        assert_eq!(engine.looping_animations(), 2);

        assert_eq!(mine.release(&mut engine), 1);
        assert_eq!(engine.looping_animations(), 1);
        assert!(engine.contains_animation(sibling));
        assert_eq!(mine.live(&engine), 0);
    }

    #[test]
    fn test_release_kills_triggers_first() {
        let mut engine = Engine::new();
        let mut scope = Scope::new();
        let anim = scope.to(&mut engine, CIRCLE, Tween::new(Vars::new().y_percent(-50.0), 1.0));
        scope.scroll_trigger(
            &mut engine,
            ScrollTrigger::scrub(CIRCLE, "top bottom".parse().unwrap(), "bottom top".parse().unwrap()),
            anim,
        );
        assert_eq!(engine.active_triggers(), 1);

        assert_eq!(scope.release(&mut engine), 2);
        assert_eq!(engine.active_triggers(), 0);
        assert_eq!(engine.active_animations(), 0);
    }

    #[test]
    fn test_completed_handles_are_pruned() {
        let mut engine = Engine::new();
        let mut scope = Scope::new();
        for _ in 0..5 {
            scope.to(&mut engine, CIRCLE, Tween::new(Vars::new().opacity(1.0), 0.1));
            engine.tick(0.2);
        }
        assert_eq!(scope.live(&engine), 0);
        assert_eq!(scope.handles.len(), 1);
    }
}
