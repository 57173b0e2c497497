use glam::Vec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::PhysicsConfig;
use crate::particle::ParticleBuffer;

/// Anchor with a slow per-axis sinusoidal drift.
///
/// Each axis is phase-shifted by the particle's own coordinates so the cloud
/// sways non-uniformly while staying centred on the static shape.
#[inline]
pub fn drift_anchor(initial: Vec3, time: f32, amplitude: f32) -> Vec3 {
    Vec3::new(
        initial.x + (time + initial.y * 0.4).sin() * amplitude,
        initial.y + (time * 0.9 + initial.x * 0.4).cos() * amplitude,
        initial.z + (time * 0.8 + initial.z * 0.4).sin() * amplitude,
    )
}

/// One particle's spring-damper update. Returns the new `(position, velocity)`.
///
/// `F = k (anchor - x) + g ŷ`, `v' = (v + F) * damping`, `x' = x + v'`.
#[inline]
pub fn spring_step(
    position: Vec3,
    velocity: Vec3,
    initial: Vec3,
    time: f32,
    config: &PhysicsConfig,
) -> (Vec3, Vec3) {
    let anchor = drift_anchor(initial, time, config.drift_amplitude);
    let mut force = (anchor - position) * config.spring_strength;
    force.y += config.gravity;
    let velocity = (velocity + force) * config.damping;
    (position + velocity, velocity)
}

/// Steady-state integration of the whole buffer for one frame.
pub fn apply_spring_physics(particles: &mut ParticleBuffer, time: f32, config: &PhysicsConfig) {
    let ParticleBuffer {
        position,
        velocity,
        target_pos,
        ..
    } = particles;

    #[cfg(feature = "parallel")]
    {
        position
            .par_iter_mut()
            .zip(velocity.par_iter_mut())
            .zip(target_pos.par_iter())
            .for_each(|((x, v), a)| {
                (*x, *v) = spring_step(*x, *v, *a, time, config);
            });
    }

    #[cfg(not(feature = "parallel"))]
    {
        for ((x, v), a) in position.iter_mut().zip(velocity.iter_mut()).zip(target_pos.iter()) {
            (*x, *v) = spring_step(*x, *v, *a, time, config);
        }
    }
}
