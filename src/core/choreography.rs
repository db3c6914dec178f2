//! Landing page motion plan
//!
//! Describes every animation on the landing page in terms of the motion
//! engine and owns them for the lifetime of one mount:
//!
//! - **Entrance sequence**: navbar, card, title, subtitle and button revealed
//!   on one timeline with overlapping offsets
//! - **Decorative loops**: each hero circle spins and rescales forever with a
//!   randomized duration and a start delay proportional to its index
//! - **Parallax binding**: the hero drifts up as the page scrolls past it
//! - **Toggle reveals**: each feature card fades in when it crosses 80% of the
//!   viewport and hides again when scrolled back above that line
//! - **Background drift**: the gradient position slides over 30 seconds, forever
//!
//! The lifecycle is strictly linear: `Idle → Mounted → Running → Disposed`.

use rand::Rng;

use crate::core::features::FEATURES;
use crate::core::motion::{
    Ease, Edge, Engine, Position, Repeat, Scope, ScrollTrigger, TargetId, Threshold, Timeline,
    ToggleAction, ToggleActions, Tween, Vars,
};

/// Delay between mount and animation setup, letting layout settle.
pub const SETUP_DELAY_MS: u32 = 100;

/// Delay before the entrance timeline starts playing, in seconds.
pub const ENTRANCE_DELAY: f64 = 0.3;

/// Hidden offset of the hero elements before the entrance sequence.
const HIDDEN_OFFSET: f64 = 30.0;

/// The page environment animations run in.
pub trait Host {
    /// Resets the viewport scroll position to the top of the document.
    fn scroll_to_top(&mut self);
}

/// Stable ids for every animated element, one per element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandingTargets {
    pub backdrop: TargetId,
    pub navbar: TargetId,
    pub login: TargetId,
    pub hero: TargetId,
    pub card: TargetId,
    pub title: TargetId,
    pub subtitle: TargetId,
    pub button: TargetId,
    pub circles: [TargetId; 3],
    pub features: [TargetId; FEATURES.len()],
}

impl Default for LandingTargets {
    fn default() -> Self {
        Self {
            backdrop: TargetId(1),
            navbar: TargetId(2),
            login: TargetId(3),
            hero: TargetId(4),
            card: TargetId(5),
            title: TargetId(6),
            subtitle: TargetId(7),
            button: TargetId(8),
            circles: [TargetId(10), TargetId(11), TargetId(12)],
            features: [TargetId(20), TargetId(21), TargetId(22)],
        }
    }
}

impl LandingTargets {
    pub fn all(&self) -> impl Iterator<Item = TargetId> + '_ {
        [
            self.backdrop,
            self.navbar,
            self.login,
            self.hero,
            self.card,
            self.title,
            self.subtitle,
            self.button,
        ]
        .into_iter()
        .chain(self.circles)
        .chain(self.features)
    }

    /// Elements whose layout boxes feed scroll triggers.
    pub fn scroll_observed(&self) -> impl Iterator<Item = TargetId> + '_ {
        std::iter::once(self.hero).chain(self.features)
    }
}

/// Elements with pointer-driven transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget {
    /// Call-to-action inside the hero card
    Button,
    Card,
    /// Login button in the navbar
    Login,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Mounted,
    Running,
    Disposed,
}

/// The staggered reveal of navbar and hero elements.
pub fn entrance_timeline(targets: &LandingTargets) -> Timeline {
    let reveal = |duration: f64, ease: Ease| {
        Tween::new(Vars::new().opacity(1.0).y(0.0), duration).ease(ease)
    };
    Timeline::new()
        .delay(ENTRANCE_DELAY)
        .to(targets.navbar, reveal(0.6, Ease::POWER2_OUT), Position::End)
        .to(
            targets.card,
            Tween::new(Vars::new().opacity(1.0).y(0.0).scale(1.0), 1.0).ease(Ease::POWER3_OUT),
            Position::Relative(-0.3),
        )
        .to(targets.title, reveal(0.8, Ease::POWER2_OUT), Position::Relative(-0.6))
        .to(targets.subtitle, reveal(0.7, Ease::POWER2_OUT), Position::Relative(-0.5))
        .to(targets.button, reveal(0.6, Ease::POWER2_OUT), Position::Relative(-0.4))
}

/// Endless spin for the decorative circle at `index`.
pub fn decorative_loop(index: usize, rng: &mut impl Rng) -> Tween {
    Tween::new(
        Vars::new()
            .scale(rng.gen_range(0.8..=1.2))
            .rotation(360.0),
        rng.gen_range(8.0..=12.0),
    )
    .ease(Ease::None)
    .repeat(Repeat::Infinite)
    .delay(index as f64 * 2.0)
}

/// Scroll-bound upward drift of the hero section.
pub fn parallax(hero: TargetId) -> (Tween, ScrollTrigger) {
    let tween = Tween::new(Vars::new().y_percent(-50.0), 1.0).ease(Ease::None);
    let trigger = ScrollTrigger::scrub(
        hero,
        Threshold {
            element: Edge::TOP,
            viewport: Edge::BOTTOM,
        },
        Threshold {
            element: Edge::BOTTOM,
            viewport: Edge::TOP,
        },
    );
    (tween, trigger)
}

/// Hidden state, visible transition and trigger for the feature card at `index`.
pub fn feature_reveal(card: TargetId, index: usize) -> (Vars, Tween, ScrollTrigger) {
    let from = Vars::new().opacity(0.0).y(50.0).scale(0.9);
    let tween = Tween::new(Vars::new().opacity(1.0).y(0.0).scale(1.0), 0.8)
        .ease(Ease::POWER3_OUT)
        .delay(index as f64 * 0.2);
    let trigger = ScrollTrigger::toggle(
        card,
        Threshold {
            element: Edge::TOP,
            viewport: Edge::at(0.8),
        },
        Threshold {
            element: Edge::BOTTOM,
            viewport: Edge::at(0.2),
        },
        ToggleActions {
            on_enter: ToggleAction::Play,
            on_leave: ToggleAction::None,
            on_enter_back: ToggleAction::None,
            on_leave_back: ToggleAction::Reverse,
        },
    );
    (from, tween, trigger)
}

/// Slow endless slide of the backdrop gradient.
pub fn background_drift() -> Tween {
    Tween::new(Vars::new().background_x(120.0), 30.0)
        .ease(Ease::None)
        .repeat(Repeat::Infinite)
}

/// Pointer enter/leave transition; leave restores the resting state.
pub fn hover_tween(target: HoverTarget, entering: bool) -> Tween {
    match (target, entering) {
        (HoverTarget::Button, true) => {
            Tween::new(Vars::new().scale(1.1).rotation(2.0), 0.3).ease(Ease::POWER2_OUT)
        }
        (HoverTarget::Button, false) => {
            Tween::new(Vars::new().scale(1.0).rotation(0.0), 0.3).ease(Ease::POWER2_OUT)
        }
        (HoverTarget::Card, true) => {
            Tween::new(Vars::new().scale(1.02).y(-5.0), 0.4).ease(Ease::POWER2_OUT)
        }
        (HoverTarget::Card, false) => {
            Tween::new(Vars::new().scale(1.0).y(0.0), 0.4).ease(Ease::POWER2_OUT)
        }
        (HoverTarget::Login, true) => Tween::new(Vars::new().scale(1.05), 0.2),
        (HoverTarget::Login, false) => Tween::new(Vars::new().scale(1.0), 0.2),
    }
}

/// Animations of one landing page mount.
#[derive(Debug)]
pub struct LandingMotion {
    targets: LandingTargets,
    scope: Scope,
    phase: Phase,
}

impl LandingMotion {
    pub fn new(targets: LandingTargets) -> Self {
        Self {
            targets,
            scope: Scope::new(),
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn targets(&self) -> &LandingTargets {
        &self.targets
    }

    /// Number of this mount's animations and triggers still registered.
    pub fn live_handles(&self, engine: &Engine) -> usize {
        self.scope.live(engine)
    }

    /// Moves the host to the top of the page. Only the first call has an effect.
    pub fn mount(&mut self, host: &mut impl Host) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        host.scroll_to_top();
        self.phase = Phase::Mounted;
        true
    }

    /// Hides the hero, then starts every animation on the page.
    pub fn start(&mut self, engine: &mut Engine, rng: &mut impl Rng) -> bool {
        if self.phase != Phase::Mounted {
            return false;
        }
        let t = self.targets;

        let hidden = Vars::new().opacity(0.0).y(HIDDEN_OFFSET);
        for target in [t.title, t.subtitle, t.button, t.card] {
            engine.set(target, &hidden);
        }
        engine.set(t.navbar, &Vars::new().opacity(0.0).y(-HIDDEN_OFFSET));

        self.scope.timeline(engine, entrance_timeline(&t));

        for (index, circle) in t.circles.into_iter().enumerate() {
            self.scope.to(engine, circle, decorative_loop(index, rng));
        }

        let (tween, trigger) = parallax(t.hero);
        let anim = self.scope.to(engine, t.hero, tween);
        self.scope.scroll_trigger(engine, trigger, anim);

        for (index, card) in t.features.into_iter().enumerate() {
            let (from, tween, trigger) = feature_reveal(card, index);
            let anim = self.scope.from_to(engine, card, from, tween);
            self.scope.scroll_trigger(engine, trigger, anim);
        }

        self.scope.to(engine, t.backdrop, background_drift());

        tracing::debug!(handles = self.scope.live(engine), "landing motion started");
        self.phase = Phase::Running;
        true
    }

    /// Starts a pointer transition. Ignored before mount and after dispose.
    pub fn hover(&mut self, engine: &mut Engine, target: HoverTarget, entering: bool) -> bool {
        if !matches!(self.phase, Phase::Mounted | Phase::Running) {
            return false;
        }
        let id = match target {
            HoverTarget::Button => self.targets.button,
            HoverTarget::Card => self.targets.card,
            HoverTarget::Login => self.targets.login,
        };
        self.scope.to(engine, id, hover_tween(target, entering));
        true
    }

    /// Releases everything this mount created and forgets its elements' state.
    pub fn dispose(&mut self, engine: &mut Engine) -> usize {
        if self.phase == Phase::Disposed {
            return 0;
        }
        self.phase = Phase::Disposed;
        let released = self.scope.release(engine);
        engine.forget_targets(self.targets.all());
        released
    }
}
