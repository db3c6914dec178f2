//! Tweens, timelines and their playback state.

use std::str::FromStr;

use super::props::{Transform, Vars};
use super::{Ease, MotionError, TargetId};

/// How many extra times an animation plays after the first pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    #[default]
    Never,
    Count(u32),
    Infinite,
}

/// Parameters of a single interpolated transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub to: Vars,
    /// Seconds
    pub duration: f64,
    pub ease: Ease,
    /// Seconds before the first pass starts
    pub delay: f64,
    pub repeat: Repeat,
}

impl Tween {
    pub fn new(to: Vars, duration: f64) -> Self {
        Self {
            to,
            duration,
            ease: Ease::default(),
            delay: 0.0,
            repeat: Repeat::Never,
        }
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn delay(mut self, seconds: f64) -> Self {
        self.delay = seconds;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }
}

/// Where a child is placed on a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Position {
    /// At the current end of the timeline
    #[default]
    End,
    /// Relative to the current end; negative values overlap
    Relative(f64),
    /// Absolute time in seconds
    At(f64),
}

impl FromStr for Position {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || MotionError::InvalidPosition(s.to_string());
        if s.is_empty() {
            return Ok(Position::End);
        }
        if let Some(rest) = s.strip_prefix("-=") {
            let v: f64 = rest.trim().parse().map_err(|_| invalid())?;
            return Ok(Position::Relative(-v));
        }
        if let Some(rest) = s.strip_prefix("+=") {
            let v: f64 = rest.trim().parse().map_err(|_| invalid())?;
            return Ok(Position::Relative(v));
        }
        let v: f64 = s.parse().map_err(|_| invalid())?;
        if v < 0.0 {
            return Err(invalid());
        }
        Ok(Position::At(v))
    }
}

/// One target's transition inside an animation.
#[derive(Debug, Clone)]
pub(crate) struct Track {
    pub target: TargetId,
    pub start: f64,
    pub duration: f64,
    pub ease: Ease,
    pub to: Vars,
    /// Start values; captured from the target on first render unless explicit
    pub from: Option<Vars>,
}

impl Track {
    fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Renders this track at animation-local time `local` onto `transform`.
    ///
    /// Returns `false` when the track has not started yet and has nothing to render.
    pub fn render(&mut self, local: f64, transform: &mut Transform) -> bool {
        let elapsed = local - self.start;
        if elapsed < 0.0 && self.from.is_none() {
            return false;
        }
        let from = self
            .from
            .get_or_insert_with(|| self.to.capture(transform))
            .clone();
        let progress = if self.duration <= 0.0 {
            if elapsed >= 0.0 { 1.0 } else { 0.0 }
        } else {
            (elapsed / self.duration).clamp(0.0, 1.0)
        };
        let eased = self.ease.apply(progress);
        for (prop, to) in self.to.iter() {
            let start = from.get(prop).unwrap_or(to);
            transform.set(prop, start + (to - start) * eased);
        }
        true
    }
}

/// Composable sequence of tweens placed by relative or absolute offsets.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    delay: f64,
    repeat: Repeat,
    tracks: Vec<Track>,
    end: f64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delay(mut self, seconds: f64) -> Self {
        self.delay = seconds;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Appends a tween on `target` at `position`.
    ///
    /// The child's own delay shifts it later; its repeat setting is ignored.
    pub fn to(mut self, target: TargetId, tween: Tween, position: Position) -> Self {
        let start = match position {
            Position::End => self.end,
            Position::Relative(offset) => (self.end + offset).max(0.0),
            Position::At(at) => at,
        } + tween.delay;
        let track = Track {
            target,
            start,
            duration: tween.duration,
            ease: tween.ease,
            to: tween.to,
            from: None,
        };
        self.end = self.end.max(track.end());
        self.tracks.push(track);
        self
    }

    /// Total length of one pass in seconds.
    pub fn duration(&self) -> f64 {
        self.end
    }

    /// Start times of each child, in insertion order.
    pub fn starts(&self) -> Vec<f64> {
        self.tracks.iter().map(|t| t.start).collect()
    }

    pub(crate) fn into_animation(self) -> Animation {
        Animation::new(self.tracks, self.delay, self.repeat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Reverse,
    Paused,
}

/// Playback state for a tween or timeline registered with the engine.
#[derive(Debug, Clone)]
pub(crate) struct Animation {
    pub tracks: Vec<Track>,
    pub delay: f64,
    pub repeat: Repeat,
    pub playhead: f64,
    pub direction: Direction,
    pub pending_delay: f64,
    /// Bound to a scroll trigger; never removed on completion
    pub held: bool,
}

impl Animation {
    pub fn new(tracks: Vec<Track>, delay: f64, repeat: Repeat) -> Self {
        Self {
            tracks,
            delay,
            repeat,
            playhead: 0.0,
            direction: Direction::Forward,
            pending_delay: delay,
            held: false,
        }
    }

    pub fn single(target: TargetId, tween: Tween, from: Option<Vars>) -> Self {
        let track = Track {
            target,
            start: 0.0,
            duration: tween.duration,
            ease: tween.ease,
            to: tween.to,
            from,
        };
        Self::new(vec![track], tween.delay, tween.repeat)
    }

    /// Length of one pass.
    pub fn iteration(&self) -> f64 {
        self.tracks.iter().map(Track::end).fold(0.0, f64::max)
    }

    /// Length of all passes; infinite for endless loops.
    pub fn total(&self) -> f64 {
        let one = self.iteration();
        match self.repeat {
            Repeat::Never => one,
            Repeat::Count(n) => one * (f64::from(n) + 1.0),
            Repeat::Infinite => f64::INFINITY,
        }
    }

    /// Whether a new free-standing tween of `to` on `target` replaces this one.
    pub fn is_overwritten_by(&self, target: TargetId, to: &Vars) -> bool {
        if self.held || self.is_looping() {
            return false;
        }
        match self.tracks.as_slice() {
            [track] => track.target == target && track.to.iter().all(|(p, _)| to.get(p).is_some()),
            _ => false,
        }
    }

    pub fn is_looping(&self) -> bool {
        self.repeat == Repeat::Infinite
    }

    pub fn is_complete(&self) -> bool {
        self.direction == Direction::Paused && self.playhead >= self.total()
    }

    /// Advances the playhead by `dt` seconds. Returns whether anything moved.
    pub fn advance(&mut self, dt: f64) -> bool {
        match self.direction {
            Direction::Paused => false,
            Direction::Forward => {
                let mut dt = dt;
                if self.pending_delay > 0.0 {
                    let consumed = dt.min(self.pending_delay);
                    self.pending_delay -= consumed;
                    dt -= consumed;
                    if dt <= 0.0 {
                        return false;
                    }
                }
                self.playhead += dt;
                let total = self.total();
                if self.playhead >= total {
                    self.playhead = total;
                    self.direction = Direction::Paused;
                }
                true
            }
            Direction::Reverse => {
                self.playhead -= dt;
                if self.playhead <= 0.0 {
                    self.playhead = 0.0;
                    self.direction = Direction::Paused;
                }
                true
            }
        }
    }

    /// Time within the current pass.
    pub fn local_time(&self) -> f64 {
        let one = self.iteration();
        if one <= 0.0 || self.repeat == Repeat::Never {
            return self.playhead.min(one);
        }
        if self.playhead >= self.total() {
            return one;
        }
        self.playhead % one
    }

    pub fn seek_progress(&mut self, progress: f64) {
        self.playhead = self.iteration() * progress.clamp(0.0, 1.0);
        self.pending_delay = 0.0;
        self.direction = Direction::Paused;
    }

    pub fn play(&mut self) {
        if self.playhead <= 0.0 {
            self.pending_delay = self.delay;
        }
        if self.playhead < self.total() {
            self.direction = Direction::Forward;
        }
    }

    /// Plays back towards the start; a reveal still waiting on its delay
    /// stays where it is.
    pub fn reverse(&mut self) {
        self.pending_delay = 0.0;
        self.direction = if self.playhead > 0.0 {
            Direction::Reverse
        } else {
            Direction::Paused
        };
    }

    pub fn pause(&mut self) {
        self.direction = Direction::Paused;
    }

    pub fn restart(&mut self) {
        self.playhead = 0.0;
        self.pending_delay = self.delay;
        self.direction = Direction::Forward;
    }

    pub fn reset(&mut self) {
        self.playhead = 0.0;
        self.pending_delay = 0.0;
        self.direction = Direction::Paused;
    }

    pub fn complete(&mut self) {
        self.playhead = self.iteration();
        self.pending_delay = 0.0;
        self.direction = Direction::Paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::motion::Prop;

    const NAV: TargetId = TargetId(1);
    const CARD: TargetId = TargetId(2);

    fn fade_in(duration: f64) -> Tween {
        Tween::new(Vars::new().opacity(1.0), duration)
    }

    #[test]
    fn test_position_parsing() {
        assert_eq!("".parse::<Position>().unwrap(), Position::End);
        assert_eq!("-=0.3".parse::<Position>().unwrap(), Position::Relative(-0.3));
        assert_eq!("+=1".parse::<Position>().unwrap(), Position::Relative(1.0));
        assert_eq!("2.5".parse::<Position>().unwrap(), Position::At(2.5));
        assert!("-=abc".parse::<Position>().is_err());
        assert!("-1".parse::<Position>().is_err());
    }

    #[test]
    fn test_timeline_overlapping_offsets() {
        let tl = Timeline::new()
            .to(NAV, fade_in(0.6), Position::End)
            .to(CARD, fade_in(1.0), Position::Relative(-0.3));

        let starts = tl.starts();
        assert!((starts[0] - 0.0).abs() < 1e-9);
        assert!((starts[1] - 0.3).abs() < 1e-9);
        assert!((tl.duration() - 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_negative_offset_clamped_at_zero() {
        let tl = Timeline::new()
            .to(NAV, fade_in(0.2), Position::End)
            .to(CARD, fade_in(1.0), Position::Relative(-5.0));
        assert_eq!(tl.starts()[1], 0.0);
    }

    #[test]
    fn test_absolute_position_does_not_move_end_backwards() {
        let tl = Timeline::new()
            .to(NAV, fade_in(2.0), Position::End)
            .to(CARD, fade_in(0.5), Position::At(0.5));
        assert_eq!(tl.duration(), 2.0);
    }

    #[test]
    fn test_track_captures_from_on_first_render() {
        let mut track = Track {
            target: NAV,
            start: 0.0,
            duration: 1.0,
            ease: Ease::None,
            to: Vars::new().opacity(1.0),
            from: None,
        };
        let mut transform = Transform {
            opacity: 0.0,
            ..Transform::default()
        };
        assert!(track.render(0.5, &mut transform));
        assert!((transform.opacity - 0.5).abs() < 1e-9);
        let from = track.from.as_ref().and_then(|f| f.get(Prop::Opacity));
        assert_eq!(from, Some(0.0));
    }

    #[test]
    fn test_track_skips_before_start() {
        let mut track = Track {
            target: NAV,
            start: 1.0,
            duration: 1.0,
            ease: Ease::None,
            to: Vars::new().opacity(1.0),
            from: None,
        };
        let mut transform = Transform::default();
        transform.opacity = 0.0;
        assert!(!track.render(0.5, &mut transform));
        assert_eq!(transform.opacity, 0.0);
    }

    #[test]
    fn test_delay_consumed_before_playhead_moves() {
        let mut anim = Animation::single(NAV, fade_in(1.0).delay(0.5), None);
        assert!(!anim.advance(0.3));
        assert_eq!(anim.playhead, 0.0);
        assert!(anim.advance(0.4));
        assert!((anim.playhead - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_finite_animation_completes() {
        let mut anim = Animation::single(NAV, fade_in(1.0), None);
        anim.advance(2.0);
        assert!(anim.is_complete());
        assert_eq!(anim.local_time(), 1.0);
    }

    #[test]
    fn test_infinite_animation_wraps() {
        let mut anim = Animation::single(NAV, fade_in(2.0).repeat(Repeat::Infinite), None);
        anim.advance(5.0);
        assert!(!anim.is_complete());
        assert!((anim.local_time() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_counted_repeat_total() {
        let anim = Animation::single(NAV, fade_in(2.0).repeat(Repeat::Count(2)), None);
        assert_eq!(anim.total(), 6.0);
    }

    #[test]
    fn test_reverse_stops_at_zero() {
        let mut anim = Animation::single(NAV, fade_in(1.0), None);
        anim.advance(0.6);
        anim.reverse();
        anim.advance(1.0);
        assert_eq!(anim.playhead, 0.0);
        assert_eq!(anim.direction, Direction::Paused);
    }

    #[test]
    fn test_play_from_start_reapplies_delay() {
        let mut anim = Animation::single(NAV, fade_in(1.0).delay(0.4), None);
        anim.pause();
        anim.pending_delay = 0.0;
        anim.play();
        assert_eq!(anim.pending_delay, 0.4);
    }

    #[test]
    fn test_reverse_during_delay_holds_start() {
        let mut anim = Animation::single(CARD, fade_in(0.8).delay(0.4), None);
        anim.advance(0.1);
        anim.reverse();

        assert!(!anim.advance(1.0));
        assert_eq!(anim.playhead, 0.0);
        assert_eq!(anim.direction, Direction::Paused);

        // playing again waits out the full delay
        anim.play();
        anim.advance(0.3);
        assert_eq!(anim.playhead, 0.0);
        anim.advance(0.2);
        assert!(anim.playhead > 0.0);
    }

    #[test]
    fn test_total_with_largest_repeat_count() {
        let anim = Animation::single(CARD, fade_in(1.0).repeat(Repeat::Count(u32::MAX)), None);
        assert_eq!(anim.total(), f64::from(u32::MAX) + 1.0);
    }
}
