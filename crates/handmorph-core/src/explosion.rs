//! Gesture-triggered burst: throw every particle away from its anchor, then
//! pull it back with an elastic overshoot.
//!
//! `Idle → Bursting → Returning → Idle`. The visual flash lives in
//! [`crate::material::MaterialFlash`] and runs on its own clock.

use glam::Vec3;
use rand::Rng;

use crate::config::ExplosionConfig;
use crate::easing::TweenStatus;
use crate::math::random_direction;
use crate::morph::BufferTween;

#[derive(Clone, Debug, Default)]
pub enum ExplosionPhase {
    #[default]
    Idle,
    /// Current positions → explosion targets.
    Bursting { tween: BufferTween, anchors: Vec<Vec3> },
    /// Explosion targets → anchors.
    Returning { tween: BufferTween },
}

/// Explosion target per particle: anchor plus a random unit direction scaled
/// by `force`.
pub fn explosion_targets<R: Rng + ?Sized>(anchors: &[Vec3], force: f32, rng: &mut R) -> Vec<Vec3> {
    anchors
        .iter()
        .map(|a| *a + random_direction(rng) * force)
        .collect()
}

#[derive(Default)]
pub struct ExplosionController {
    phase: ExplosionPhase,
}

impl ExplosionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &ExplosionPhase {
        &self.phase
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, ExplosionPhase::Idle)
    }

    /// Install a new burst from `positions` toward freshly drawn explosion
    /// targets around `anchors`. Any running explosion is torn down first.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        positions: &[Vec3],
        anchors: &[Vec3],
        config: &ExplosionConfig,
        rng: &mut R,
    ) {
        self.cancel();
        let targets = explosion_targets(anchors, config.force, rng);
        self.phase = ExplosionPhase::Bursting {
            tween: BufferTween::new(positions, &targets, config.burst_duration, config.burst_easing),
            anchors: anchors.to_vec(),
        };
    }

    pub fn cancel(&mut self) -> bool {
        !matches!(std::mem::take(&mut self.phase), ExplosionPhase::Idle)
    }

    /// Step the active phase. The burst chains into the return phase in the
    /// tick it finishes; `Finished` is reported only once the return settles.
    pub fn step(&mut self, dt: f32, positions: &mut [Vec3], config: &ExplosionConfig) -> TweenStatus {
        match &mut self.phase {
            ExplosionPhase::Idle => TweenStatus::Finished,
            ExplosionPhase::Bursting { tween, anchors } => {
                if tween.step(dt, positions) == TweenStatus::Finished {
                    let tween = BufferTween::new(
                        tween.target(),
                        anchors,
                        config.return_duration,
                        config.return_easing,
                    );
                    log::trace!("explosion burst finished, returning to anchors");
                    self.phase = ExplosionPhase::Returning { tween };
                }
                TweenStatus::Running
            }
            ExplosionPhase::Returning { tween } => {
                let status = tween.step(dt, positions);
                if status == TweenStatus::Finished {
                    self.phase = ExplosionPhase::Idle;
                }
                status
            }
        }
    }
}
