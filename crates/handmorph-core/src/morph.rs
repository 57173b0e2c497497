use glam::Vec3;

use crate::easing::{Easing, Tween, TweenStatus};

/// Eased blend of a whole position buffer between two owned snapshots.
///
/// Both endpoints are copied at construction, so later writes to the live
/// buffer or the anchor set cannot disturb an in-flight blend.
#[derive(Clone, Debug)]
pub struct BufferTween {
    from: Vec<Vec3>,
    to: Vec<Vec3>,
    tween: Tween,
}

impl BufferTween {
    pub fn new(from: &[Vec3], to: &[Vec3], duration: f32, easing: Easing) -> Self {
        debug_assert_eq!(from.len(), to.len());
        Self {
            from: from.to_vec(),
            to: to.to_vec(),
            tween: Tween::new(duration, easing),
        }
    }

    /// Advance by `dt` and write `from + (to - from) * ease(t)` into `positions`.
    pub fn step(&mut self, dt: f32, positions: &mut [Vec3]) -> TweenStatus {
        let (t, status) = self.tween.advance(dt);
        for ((out, from), to) in positions.iter_mut().zip(&self.from).zip(&self.to) {
            *out = *from + (*to - *from) * t;
        }
        status
    }

    /// Destination snapshot.
    pub fn target(&self) -> &[Vec3] {
        &self.to
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.tween.progress()
    }
}

/// Single-slot morph driver: at most one morph exists at a time.
#[derive(Default)]
pub struct MorphController {
    active: Option<BufferTween>,
}

impl MorphController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tear down any running morph, then install a new one from a snapshot
    /// of `from` toward `to`.
    pub fn begin(&mut self, from: &[Vec3], to: &[Vec3], duration: f32, easing: Easing) {
        self.cancel();
        self.active = Some(BufferTween::new(from, to, duration, easing));
    }

    /// Drop the running morph. Positions already written stay as they are.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn progress(&self) -> Option<f32> {
        self.active.as_ref().map(BufferTween::progress)
    }

    /// Step the running morph. On `Finished` the slot is cleared and the
    /// caller runs the completion action. With no morph installed this is a
    /// no-op that reports `Finished`.
    pub fn step(&mut self, dt: f32, positions: &mut [Vec3]) -> TweenStatus {
        let Some(tween) = self.active.as_mut() else {
            return TweenStatus::Finished;
        };
        let status = tween.step(dt, positions);
        if status == TweenStatus::Finished {
            self.active = None;
        }
        status
    }
}
