//! Named easing curves and the scalar tween that drives every transition.
//!
//! Curves follow the GSAP naming used by animation tooling: `power1` is
//! quadratic, `power2` cubic, `power3` quartic.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

/// Easing curve mapping linear progress `t ∈ [0, 1]` to eased progress.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Easing {
    Linear,
    /// `powerN.in`
    PowerIn { power: u8 },
    /// `powerN.out`
    PowerOut { power: u8 },
    /// `powerN.inOut`
    PowerInOut { power: u8 },
    /// `elastic.out(amplitude, period)`; overshoots before settling at 1.
    ElasticOut { amplitude: f32, period: f32 },
}

impl Easing {
    pub const POWER1_OUT: Self = Self::PowerOut { power: 1 };
    pub const POWER2_IN: Self = Self::PowerIn { power: 2 };
    pub const POWER2_OUT: Self = Self::PowerOut { power: 2 };
    pub const POWER2_IN_OUT: Self = Self::PowerInOut { power: 2 };
    pub const POWER3_OUT: Self = Self::PowerOut { power: 3 };

    /// Evaluate the curve. Input is clamped to `[0, 1]`; every curve maps
    /// 0 to 0 and 1 to 1 exactly.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::PowerIn { power } => power_in(t, power),
            Easing::PowerOut { power } => 1.0 - power_in(1.0 - t, power),
            Easing::PowerInOut { power } => {
                if t < 0.5 {
                    power_in(t * 2.0, power) * 0.5
                } else {
                    1.0 - power_in((1.0 - t) * 2.0, power) * 0.5
                }
            }
            Easing::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
        }
    }
}

#[inline]
fn power_in(t: f32, power: u8) -> f32 {
    t.powi(i32::from(power) + 1)
}

fn elastic_out(t: f32, amplitude: f32, period: f32) -> f32 {
    if t >= 1.0 {
        return 1.0;
    }
    if t <= 0.0 {
        return 0.0;
    }
    let a = amplitude.max(1.0);
    let period = if period > 0.0 { period } else { 0.3 };
    let p = period / amplitude.min(1.0).max(f32::EPSILON);
    let shift = p / TAU * (1.0 / a).asin();
    let freq = TAU / p;
    a * 2f32.powf(-10.0 * t) * ((t - shift) * freq).sin() + 1.0
}

/// Completion state reported by a tween step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenStatus {
    Running,
    Finished,
}

/// Scalar 0 → 1 progress driver advanced by frame delta time.
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    elapsed: f32,
    duration: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(duration: f32, easing: Easing) -> Self {
        Self {
            elapsed: 0.0,
            duration: duration.max(0.0),
            easing,
        }
    }

    /// Advance by `dt` seconds and return `(eased_progress, status)`.
    /// A zero-length tween finishes on its first step.
    pub fn advance(&mut self, dt: f32) -> (f32, TweenStatus) {
        self.elapsed += dt.max(0.0);
        let t = if self.duration > 0.0 {
            (self.elapsed / self.duration).min(1.0)
        } else {
            1.0
        };
        let status = if t >= 1.0 {
            TweenStatus::Finished
        } else {
            TweenStatus::Running
        };
        (self.easing.apply(t), status)
    }

    /// Linear (un-eased) progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).min(1.0)
        } else {
            1.0
        }
    }
}
