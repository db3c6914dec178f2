//! Registry of active animations and scroll triggers.
//!
//! The engine holds the visual state of every target it has touched, advances
//! animations on `tick`, and re-evaluates scroll triggers whenever geometry or
//! scroll offset changes. It knows nothing about the DOM: the host reads
//! changed targets back with [`Engine::take_dirty`] and writes them out.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::props::{PropSet, Transform, Vars};
use super::trigger::{BoundTrigger, Bounds, ScrollTrigger, ToggleAction, TriggerMode, TriggerUpdate};
use super::tween::{Animation, Timeline, Tween};
use super::{AnimationId, TargetId, TriggerId};

#[derive(Debug, Clone, Copy, Default)]
struct TargetState {
    transform: Transform,
    touched: PropSet,
}

/// Scroll offset and height of the viewport in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

#[derive(Debug, Default)]
pub struct Engine {
    targets: HashMap<TargetId, TargetState>,
    animations: BTreeMap<AnimationId, Animation>,
    triggers: BTreeMap<TriggerId, BoundTrigger>,
    bounds: HashMap<TargetId, Bounds>,
    viewport: Viewport,
    dirty: BTreeSet<TargetId>,
    next_id: u64,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Assigns properties immediately.
    pub fn set(&mut self, target: TargetId, vars: &Vars) {
        let state = self.targets.entry(target).or_default();
        for (prop, value) in vars.iter() {
            state.transform.set(prop, value);
            state.touched.insert(prop);
        }
        self.dirty.insert(target);
    }

    /// Tweens from the target's current values to `tween.to`.
    ///
    /// Earlier free-standing tweens on the same target that only animate a
    /// subset of these properties are overwritten.
    pub fn to(&mut self, target: TargetId, tween: Tween) -> AnimationId {
        self.animations.retain(|_, a| !a.is_overwritten_by(target, &tween.to));
        self.insert(Animation::single(target, tween, None))
    }

    /// Tweens from explicit `from` values; the from-state is rendered right away.
    pub fn from_to(&mut self, target: TargetId, from: Vars, tween: Tween) -> AnimationId {
        self.set(target, &from);
        self.insert(Animation::single(target, tween, Some(from)))
    }

    pub fn timeline(&mut self, timeline: Timeline) -> AnimationId {
        self.insert(timeline.into_animation())
    }

    fn insert(&mut self, animation: Animation) -> AnimationId {
        let id = AnimationId(self.next_id());
        self.animations.insert(id, animation);
        id
    }

    /// Binds `animation` to scroll position.
    ///
    /// The animation stops playing on its own clock: scrubbed animations follow
    /// scroll progress, toggled ones wait for a boundary crossing.
    pub fn scroll_trigger(&mut self, config: ScrollTrigger, animation: AnimationId) -> TriggerId {
        if let Some(anim) = self.animations.get_mut(&animation) {
            anim.held = true;
            anim.pause();
        }
        let id = TriggerId(self.next_id());
        self.triggers.insert(id, BoundTrigger::new(config, animation));
        self.refresh_triggers();
        id
    }

    pub fn kill_animation(&mut self, id: AnimationId) -> bool {
        self.animations.remove(&id).is_some()
    }

    pub fn kill_trigger(&mut self, id: TriggerId) -> bool {
        self.triggers.remove(&id).is_some()
    }

    /// Stops every animation touching `target` and the triggers driving them.
    pub fn kill_tweens_of(&mut self, target: TargetId) -> usize {
        let doomed: Vec<AnimationId> = self
            .animations
            .iter()
            .filter(|(_, a)| a.tracks.iter().any(|t| t.target == target))
            .map(|(id, _)| *id)
            .collect();
        for id in &doomed {
            self.animations.remove(id);
        }
        self.triggers.retain(|_, t| !doomed.contains(&t.animation));
        doomed.len()
    }

    pub fn contains_animation(&self, id: AnimationId) -> bool {
        self.animations.contains_key(&id)
    }

    pub fn contains_trigger(&self, id: TriggerId) -> bool {
        self.triggers.contains_key(&id)
    }

    pub fn active_animations(&self) -> usize {
        self.animations.len()
    }

    pub fn looping_animations(&self) -> usize {
        self.animations.values().filter(|a| a.is_looping()).count()
    }

    pub fn active_triggers(&self) -> usize {
        self.triggers.len()
    }

    /// Current visual state of `target`; identity if never touched.
    pub fn transform(&self, target: TargetId) -> Transform {
        self.targets
            .get(&target)
            .map(|s| s.transform)
            .unwrap_or_default()
    }

    pub fn touched(&self, target: TargetId) -> PropSet {
        self.targets
            .get(&target)
            .map(|s| s.touched)
            .unwrap_or_default()
    }

    /// Targets changed since the last call, with the properties to write.
    pub fn take_dirty(&mut self) -> Vec<(TargetId, Transform, PropSet)> {
        std::mem::take(&mut self.dirty)
            .into_iter()
            .filter_map(|id| {
                self.targets
                    .get(&id)
                    .map(|s| (id, s.transform, s.touched))
            })
            .collect()
    }

    /// Forgets the visual state of targets, e.g. after their elements unmount.
    pub fn forget_targets(&mut self, targets: impl IntoIterator<Item = TargetId>) {
        for id in targets {
            self.targets.remove(&id);
            self.bounds.remove(&id);
            self.dirty.remove(&id);
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.refresh_triggers();
    }

    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.set_viewport(Viewport {
            scroll_y,
            ..self.viewport
        });
    }

    pub fn set_bounds(&mut self, target: TargetId, bounds: Bounds) {
        self.bounds.insert(target, bounds);
        self.refresh_triggers();
    }

    /// Advances every playing animation by `dt` seconds and renders it.
    ///
    /// Animations render in creation order, so the most recent tween on a
    /// property wins. Finished animations not held by a trigger are dropped.
    pub fn tick(&mut self, dt: f64) {
        let dt = dt.max(0.0);
        let Self {
            animations,
            targets,
            dirty,
            ..
        } = self;
        for animation in animations.values_mut() {
            if animation.advance(dt) {
                render(animation, targets, dirty);
            }
        }
        let before = animations.len();
        animations.retain(|_, a| a.held || !a.is_complete());
        let finished = before - animations.len();
        if finished > 0 {
            tracing::trace!(finished, "dropped completed animations");
        }
    }

    fn refresh_triggers(&mut self) {
        let Viewport { scroll_y, height } = self.viewport;
        if height <= 0.0 {
            return;
        }
        let mut updates: Vec<(AnimationId, ScrollTrigger, TriggerUpdate)> = Vec::new();
        for trigger in self.triggers.values_mut() {
            let Some(bounds) = self.bounds.get(&trigger.config.trigger).copied() else {
                continue;
            };
            let update = trigger.update(scroll_y, height, bounds);
            updates.push((trigger.animation, trigger.config, update));
        }

        let Self {
            animations,
            targets,
            dirty,
            ..
        } = self;
        for (id, config, update) in updates {
            let Some(animation) = animations.get_mut(&id) else {
                continue;
            };
            match config.mode {
                TriggerMode::Scrub => {
                    animation.seek_progress(update.progress);
                    render(animation, targets, dirty);
                }
                TriggerMode::Toggle(_) => {
                    for crossing in update.crossings {
                        let action = config.action_for(crossing);
                        tracing::trace!(?crossing, ?action, "scroll trigger crossing");
                        if apply_action(animation, action) {
                            render(animation, targets, dirty);
                        }
                    }
                }
            }
        }
    }
}

/// Applies a toggle action. Returns whether the animation must re-render now.
fn apply_action(animation: &mut Animation, action: ToggleAction) -> bool {
    match action {
        ToggleAction::Play | ToggleAction::Resume => {
            animation.play();
            false
        }
        ToggleAction::Reverse => {
            animation.reverse();
            false
        }
        ToggleAction::Pause => {
            animation.pause();
            false
        }
        ToggleAction::Restart => {
            animation.restart();
            true
        }
        ToggleAction::Reset => {
            animation.reset();
            true
        }
        ToggleAction::Complete => {
            animation.complete();
            true
        }
        ToggleAction::None => false,
    }
}

fn render(
    animation: &mut Animation,
    targets: &mut HashMap<TargetId, TargetState>,
    dirty: &mut BTreeSet<TargetId>,
) {
    let local = animation.local_time();
    for track in &mut animation.tracks {
        let state = targets.entry(track.target).or_default();
        if track.render(local, &mut state.transform) {
            for (prop, _) in track.to.iter() {
                state.touched.insert(prop);
            }
            dirty.insert(track.target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::motion::{Ease, Repeat};

    const BUTTON: TargetId = TargetId(1);
    const CARD: TargetId = TargetId(2);

    fn run(engine: &mut Engine, seconds: f64) {
        let frames = (seconds * 60.0).ceil() as usize;
        for _ in 0..frames {
            engine.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn test_set_is_immediate_and_dirty() {
        let mut engine = Engine::new();
        engine.set(CARD, &Vars::new().opacity(0.0).y(30.0));

        let t = engine.transform(CARD);
        assert_eq!(t.opacity, 0.0);
        assert_eq!(t.y, 30.0);

        let dirty = engine.take_dirty();
        assert_eq!(dirty.len(), 1);
        assert!(engine.take_dirty().is_empty());
    }

    #[test]
    fn test_to_interpolates_and_is_dropped_when_done() {
        let mut engine = Engine::new();
        engine.set(CARD, &Vars::new().opacity(0.0));
        let id = engine.to(CARD, Tween::new(Vars::new().opacity(1.0), 1.0).ease(Ease::None));

        engine.tick(0.5);
        assert!((engine.transform(CARD).opacity - 0.5).abs() < 1e-9);
        assert!(engine.contains_animation(id));

        engine.tick(0.6);
        assert_eq!(engine.transform(CARD).opacity, 1.0);
        assert!(!engine.contains_animation(id));
        assert_eq!(engine.active_animations(), 0);
    }

    #[test]
    fn test_later_tween_overwrites_conflicting_one() {
        let mut engine = Engine::new();
        let first = engine.to(BUTTON, Tween::new(Vars::new().scale(2.0), 1.0));
        engine.tick(0.1);
        engine.to(BUTTON, Tween::new(Vars::new().scale(1.0), 0.2));
        assert!(!engine.contains_animation(first));

        run(&mut engine, 2.0);
        assert!((engine.transform(BUTTON).scale - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_tweens_on_other_props_coexist() {
        let mut engine = Engine::new();
        let fade = engine.to(BUTTON, Tween::new(Vars::new().opacity(0.0), 1.0));
        engine.to(BUTTON, Tween::new(Vars::new().scale(1.5), 1.0));
        assert!(engine.contains_animation(fade));
        assert_eq!(engine.active_animations(), 2);
    }

    #[test]
    fn test_from_to_renders_from_state_immediately() {
        let mut engine = Engine::new();
        engine.from_to(
            CARD,
            Vars::new().opacity(0.0).y(50.0),
            Tween::new(Vars::new().opacity(1.0).y(0.0), 0.8),
        );
        assert_eq!(engine.transform(CARD).y, 50.0);
    }

    #[test]
    fn test_looping_animation_never_finishes() {
        let mut engine = Engine::new();
        let id = engine.to(
            CARD,
            Tween::new(Vars::new().rotation(360.0), 1.0)
                .ease(Ease::None)
                .repeat(Repeat::Infinite),
        );
        run(&mut engine, 10.0);
        assert!(engine.contains_animation(id));
        assert_eq!(engine.looping_animations(), 1);
    }

    #[test]
    fn test_kill_tweens_of_removes_bound_triggers() {
        let mut engine = Engine::new();
        let id = engine.to(CARD, Tween::new(Vars::new().opacity(1.0), 1.0));
        engine.to(BUTTON, Tween::new(Vars::new().opacity(1.0), 1.0));
        engine.scroll_trigger(
            ScrollTrigger::scrub(CARD, "top bottom".parse().unwrap(), "bottom top".parse().unwrap()),
            id,
        );

        assert_eq!(engine.kill_tweens_of(CARD), 1);
        assert_eq!(engine.active_animations(), 1);
        assert_eq!(engine.active_triggers(), 0);
    }

    #[test]
    fn test_scrub_follows_scroll() {
        let mut engine = Engine::new();
        let id = engine.to(
            CARD,
            Tween::new(Vars::new().y_percent(-50.0), 1.0).ease(Ease::None),
        );
        engine.scroll_trigger(
            ScrollTrigger::scrub(CARD, "top bottom".parse().unwrap(), "bottom top".parse().unwrap()),
            id,
        );
        engine.set_bounds(CARD, Bounds { top: 0.0, height: 1000.0 });
        engine.set_viewport(Viewport { scroll_y: 0.0, height: 1000.0 });
        assert!((engine.transform(CARD).y_percent + 25.0).abs() < 1e-9);

        engine.scroll_to(1000.0);
        assert!((engine.transform(CARD).y_percent + 50.0).abs() < 1e-9);

        // the clock does not move a scrubbed animation
        run(&mut engine, 1.0);
        assert!((engine.transform(CARD).y_percent + 50.0).abs() < 1e-9);
        assert!(engine.contains_animation(id));
    }

    #[test]
    fn test_forget_targets_clears_state() {
        let mut engine = Engine::new();
        engine.set(CARD, &Vars::new().opacity(0.0));
        engine.forget_targets([CARD]);
        assert_eq!(engine.transform(CARD), Transform::default());
        assert!(engine.take_dirty().is_empty());
    }
}
