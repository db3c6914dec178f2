//! Easing curves.
//!
//! `powerN` follows the usual animation-library convention where the exponent
//! is `N + 1`: `power1` is quadratic, `power2` cubic, `power3` quartic.

use std::str::FromStr;

use super::MotionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EaseDirection {
    In,
    Out,
    InOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    /// Linear progression
    None,
    Power(u8, EaseDirection),
}

impl Default for Ease {
    fn default() -> Self {
        Ease::POWER1_OUT
    }
}

impl Ease {
    pub const POWER1_OUT: Ease = Ease::Power(1, EaseDirection::Out);
    pub const POWER2_OUT: Ease = Ease::Power(2, EaseDirection::Out);
    pub const POWER3_OUT: Ease = Ease::Power(3, EaseDirection::Out);

    /// Maps linear progress in `[0, 1]` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::None => t,
            Ease::Power(n, direction) => {
                let exp = i32::from(n) + 1;
                match direction {
                    EaseDirection::In => t.powi(exp),
                    EaseDirection::Out => 1.0 - (1.0 - t).powi(exp),
                    EaseDirection::InOut => {
                        if t < 0.5 {
                            (2.0 * t).powi(exp) / 2.0
                        } else {
                            1.0 - (2.0 * (1.0 - t)).powi(exp) / 2.0
                        }
                    }
                }
            }
        }
    }
}

impl FromStr for Ease {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "none" || s == "linear" {
            return Ok(Ease::None);
        }
        let unknown = || MotionError::UnknownEase(s.to_string());
        let rest = s.strip_prefix("power").ok_or_else(unknown)?;
        let (level, direction) = match rest.split_once('.') {
            Some((level, dir)) => (level, dir),
            None => (rest, "out"),
        };
        let level: u8 = level.parse().map_err(|_| unknown())?;
        if !(1..=4).contains(&level) {
            return Err(unknown());
        }
        let direction = match direction {
            "in" => EaseDirection::In,
            "out" => EaseDirection::Out,
            "inOut" => EaseDirection::InOut,
            _ => return Err(unknown()),
        };
        Ok(Ease::Power(level, direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_endpoints_are_fixed() {
        for ease in ["none", "power1.in", "power2.out", "power3.inOut", "power4"] {
            let ease: Ease = ease.parse().unwrap();
            assert!(approx(ease.apply(0.0), 0.0), "{ease:?} at 0");
            assert!(approx(ease.apply(1.0), 1.0), "{ease:?} at 1");
        }
    }

    #[test]
    fn test_power2_out_is_cubic() {
        assert!(approx(Ease::POWER2_OUT.apply(0.5), 1.0 - 0.125));
    }

    #[test]
    fn test_power3_out_is_quartic() {
        assert!(approx(Ease::POWER3_OUT.apply(0.5), 1.0 - 0.0625));
    }

    #[test]
    fn test_in_out_is_symmetric() {
        let ease: Ease = "power2.inOut".parse().unwrap();
        assert!(approx(ease.apply(0.5), 0.5));
        assert!(approx(ease.apply(0.25) + ease.apply(0.75), 1.0));
    }

    #[test]
    fn test_progress_is_clamped() {
        assert!(approx(Ease::None.apply(1.5), 1.0));
        assert!(approx(Ease::None.apply(-0.5), 0.0));
    }

    #[test]
    fn test_unknown_ease_rejected() {
        assert!("elastic.out".parse::<Ease>().is_err());
        assert!("power9.out".parse::<Ease>().is_err());
        assert!("power2.sideways".parse::<Ease>().is_err());
    }

    #[test]
    fn test_default_is_power1_out() {
        assert_eq!(Ease::default(), "power1.out".parse().unwrap());
    }
}
