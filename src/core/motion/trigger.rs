//! Scroll-linked triggers.
//!
//! A trigger watches one element's layout box against the viewport. Its
//! `start` and `end` thresholds are written as `"<element edge> <viewport edge>"`,
//! e.g. `"top 80%"` fires when the element's top reaches 80% of the viewport
//! height. Between start and end the trigger is active.

use std::str::FromStr;

use super::{AnimationId, MotionError, TargetId};

/// A point on a box, as a fraction of its height plus a pixel offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub fraction: f64,
    pub offset_px: f64,
}

impl Edge {
    pub const TOP: Edge = Edge::at(0.0);
    pub const CENTER: Edge = Edge::at(0.5);
    pub const BOTTOM: Edge = Edge::at(1.0);

    pub const fn at(fraction: f64) -> Self {
        Self {
            fraction,
            offset_px: 0.0,
        }
    }

    fn resolve(&self, extent: f64) -> f64 {
        self.fraction * extent + self.offset_px
    }
}

impl FromStr for Edge {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MotionError::InvalidThreshold(s.to_string());
        match s {
            "top" => Ok(Edge::TOP),
            "center" => Ok(Edge::CENTER),
            "bottom" => Ok(Edge::BOTTOM),
            _ => {
                if let Some(pct) = s.strip_suffix('%') {
                    let pct: f64 = pct.parse().map_err(|_| invalid())?;
                    Ok(Edge::at(pct / 100.0))
                } else if let Some(px) = s.strip_suffix("px") {
                    let px: f64 = px.parse().map_err(|_| invalid())?;
                    Ok(Edge {
                        fraction: 0.0,
                        offset_px: px,
                    })
                } else {
                    Err(invalid())
                }
            }
        }
    }
}

/// Where a trigger starts or ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub element: Edge,
    pub viewport: Edge,
}

impl Threshold {
    /// Scroll offset at which this threshold is crossed.
    pub fn scroll_position(&self, bounds: Bounds, viewport_height: f64) -> f64 {
        bounds.top + self.element.resolve(bounds.height) - self.viewport.resolve(viewport_height)
    }
}

impl FromStr for Threshold {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(element), Some(viewport), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(MotionError::InvalidThreshold(s.to_string()));
        };
        Ok(Self {
            element: element.parse()?,
            viewport: viewport.parse()?,
        })
    }
}

/// Layout box of an element in document coordinates, ignoring transforms.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

/// What to do with the bound animation on a boundary crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Play,
    Pause,
    Resume,
    Reverse,
    Restart,
    Reset,
    Complete,
    None,
}

impl FromStr for ToggleAction {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "play" => ToggleAction::Play,
            "pause" => ToggleAction::Pause,
            "resume" => ToggleAction::Resume,
            "reverse" => ToggleAction::Reverse,
            "restart" => ToggleAction::Restart,
            "reset" => ToggleAction::Reset,
            "complete" => ToggleAction::Complete,
            "none" => ToggleAction::None,
            other => return Err(MotionError::UnknownToggleAction(other.to_string())),
        })
    }
}

/// Actions for enter, leave, enter-back and leave-back, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl Default for ToggleActions {
    fn default() -> Self {
        Self {
            on_enter: ToggleAction::Play,
            on_leave: ToggleAction::None,
            on_enter_back: ToggleAction::None,
            on_leave_back: ToggleAction::None,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let actions = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<ToggleAction>, _>>()?;
        let &[on_enter, on_leave, on_enter_back, on_leave_back] = &actions[..] else {
            return Err(MotionError::UnknownToggleAction(s.to_string()));
        };
        Ok(Self {
            on_enter,
            on_leave,
            on_enter_back,
            on_leave_back,
        })
    }
}

/// Boundary crossings reported by a trigger update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerMode {
    /// Animation progress follows scroll progress between start and end
    Scrub,
    Toggle(ToggleActions),
}

/// Configuration for a scroll trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTrigger {
    pub trigger: TargetId,
    pub start: Threshold,
    pub end: Threshold,
    pub mode: TriggerMode,
}

impl ScrollTrigger {
    pub fn scrub(trigger: TargetId, start: Threshold, end: Threshold) -> Self {
        Self {
            trigger,
            start,
            end,
            mode: TriggerMode::Scrub,
        }
    }

    pub fn toggle(
        trigger: TargetId,
        start: Threshold,
        end: Threshold,
        actions: ToggleActions,
    ) -> Self {
        Self {
            trigger,
            start,
            end,
            mode: TriggerMode::Toggle(actions),
        }
    }

    pub fn action_for(&self, crossing: Crossing) -> ToggleAction {
        match self.mode {
            TriggerMode::Scrub => ToggleAction::None,
            TriggerMode::Toggle(actions) => match crossing {
                Crossing::Enter => actions.on_enter,
                Crossing::Leave => actions.on_leave,
                Crossing::EnterBack => actions.on_enter_back,
                Crossing::LeaveBack => actions.on_leave_back,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Zone {
    Before,
    Active,
    After,
}

impl Zone {
    /// Crossings when moving from `self` to `next`, in the order they happen.
    fn crossings_to(self, next: Zone) -> &'static [Crossing] {
        match (self, next) {
            (Zone::Before, Zone::Active) => &[Crossing::Enter],
            (Zone::Before, Zone::After) => &[Crossing::Enter, Crossing::Leave],
            (Zone::Active, Zone::After) => &[Crossing::Leave],
            (Zone::After, Zone::Active) => &[Crossing::EnterBack],
            (Zone::After, Zone::Before) => &[Crossing::EnterBack, Crossing::LeaveBack],
            (Zone::Active, Zone::Before) => &[Crossing::LeaveBack],
            _ => &[],
        }
    }
}

/// A registered trigger with its live state.
#[derive(Debug, Clone)]
pub(crate) struct BoundTrigger {
    pub config: ScrollTrigger,
    pub animation: AnimationId,
    pub zone: Zone,
}

/// Result of evaluating a trigger against the current scroll offset.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TriggerUpdate {
    pub crossings: Vec<Crossing>,
    /// Scroll progress between start and end, in `[0, 1]`
    pub progress: f64,
}

impl BoundTrigger {
    pub fn new(config: ScrollTrigger, animation: AnimationId) -> Self {
        Self {
            config,
            animation,
            zone: Zone::Before,
        }
    }

    pub fn update(&mut self, scroll_y: f64, viewport_height: f64, bounds: Bounds) -> TriggerUpdate {
        let start = self.config.start.scroll_position(bounds, viewport_height);
        let end = self
            .config
            .end
            .scroll_position(bounds, viewport_height)
            .max(start);
        let zone = if scroll_y < start {
            Zone::Before
        } else if scroll_y > end {
            Zone::After
        } else {
            Zone::Active
        };
        let crossings = self.zone.crossings_to(zone).to_vec();
        self.zone = zone;
        let progress = if end > start {
            ((scroll_y - start) / (end - start)).clamp(0.0, 1.0)
        } else if scroll_y >= start {
            1.0
        } else {
            0.0
        };
        TriggerUpdate {
            crossings,
            progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_trigger() -> BoundTrigger {
        let config = ScrollTrigger::toggle(
            TargetId(7),
            "top 80%".parse().unwrap(),
            "bottom 20%".parse().unwrap(),
            "play none none reverse".parse().unwrap(),
        );
        BoundTrigger::new(config, AnimationId(1))
    }

    const CARD: Bounds = Bounds {
        top: 1200.0,
        height: 300.0,
    };

    #[test]
    fn test_threshold_parsing() {
        let t: Threshold = "top 80%".parse().unwrap();
        assert_eq!(t.element, Edge::TOP);
        assert!((t.viewport.fraction - 0.8).abs() < 1e-9);

        let t: Threshold = "center 100px".parse().unwrap();
        assert_eq!(t.element, Edge::CENTER);
        assert_eq!(t.viewport.offset_px, 100.0);

        assert!("top".parse::<Threshold>().is_err());
        assert!("top bottom extra".parse::<Threshold>().is_err());
        assert!("middle bottom".parse::<Threshold>().is_err());
    }

    #[test]
    fn test_threshold_scroll_position() {
        let start: Threshold = "top 80%".parse().unwrap();
        // element top at 1200, viewport 1000 tall -> crosses at 1200 - 800
        assert_eq!(start.scroll_position(CARD, 1000.0), 400.0);

        let end: Threshold = "bottom top".parse().unwrap();
        assert_eq!(end.scroll_position(CARD, 1000.0), 1500.0);
    }

    #[test]
    fn test_toggle_actions_parsing() {
        let actions: ToggleActions = "play none none reverse".parse().unwrap();
        assert_eq!(actions.on_enter, ToggleAction::Play);
        assert_eq!(actions.on_leave, ToggleAction::None);
        assert_eq!(actions.on_enter_back, ToggleAction::None);
        assert_eq!(actions.on_leave_back, ToggleAction::Reverse);

        assert!("play none".parse::<ToggleActions>().is_err());
        assert!("play none none rewind".parse::<ToggleActions>().is_err());
    }

    #[test]
    fn test_enter_and_leave_back() {
        let mut trigger = card_trigger();

        let update = trigger.update(0.0, 1000.0, CARD);
        assert!(update.crossings.is_empty());

        let update = trigger.update(450.0, 1000.0, CARD);
        assert_eq!(update.crossings, vec![Crossing::Enter]);

        let update = trigger.update(300.0, 1000.0, CARD);
        assert_eq!(update.crossings, vec![Crossing::LeaveBack]);
        assert_eq!(
            trigger.config.action_for(Crossing::LeaveBack),
            ToggleAction::Reverse
        );
    }

    #[test]
    fn test_jump_past_end_reports_both_crossings() {
        let mut trigger = card_trigger();
        let update = trigger.update(5000.0, 1000.0, CARD);
        assert_eq!(update.crossings, vec![Crossing::Enter, Crossing::Leave]);

        let update = trigger.update(0.0, 1000.0, CARD);
        assert_eq!(
            update.crossings,
            vec![Crossing::EnterBack, Crossing::LeaveBack]
        );
    }

    #[test]
    fn test_scrub_progress() {
        let config = ScrollTrigger::scrub(
            TargetId(1),
            "top bottom".parse().unwrap(),
            "bottom top".parse().unwrap(),
        );
        let mut trigger = BoundTrigger::new(config, AnimationId(1));
        let hero = Bounds {
            top: 0.0,
            height: 1000.0,
        };
        // start = 0 - 1000, end = 1000
        assert_eq!(trigger.update(0.0, 1000.0, hero).progress, 0.5);
        assert_eq!(trigger.update(1000.0, 1000.0, hero).progress, 1.0);
        assert_eq!(trigger.update(2000.0, 1000.0, hero).progress, 1.0);
        assert_eq!(trigger.config.action_for(Crossing::Enter), ToggleAction::None);
    }
}
