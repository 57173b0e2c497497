//! Self-renewing ballistic firework particles.
//!
//! Each burst starts at the origin, falls under gravity while fading, and is
//! regenerated wholesale once every particle has faded out.

use glam::Vec3;
use rand::Rng;

use crate::config::FireworkConfig;
use crate::material::Rgb;
use crate::shapes::dispatcher::firework_burst;

/// Alpha at or below this counts as extinct. Absorbs the rounding left over
/// from repeated `alpha -= decay` so a 1/decay-tick lifetime holds exactly.
const EXTINCT_ALPHA: f32 = 1.0e-4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FireworkParticle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Opacity in `[0, 1]`; the particle is hidden once it reaches zero.
    pub alpha: f32,
    pub color: Rgb,
}

impl FireworkParticle {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alpha > 0.0
    }
}

/// One burst: every particle shares the burst's base color.
#[derive(Clone, Debug)]
pub struct FireworkBurst {
    pub particles: Vec<FireworkParticle>,
    pub base_color: Rgb,
}

impl FireworkBurst {
    pub fn all_extinct(&self) -> bool {
        self.particles.iter().all(|p| !p.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_alive()).count()
    }
}

/// Outcome of one firework tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FireworkStatus {
    Burning,
    /// Every particle faded this tick and a fresh burst replaced the set.
    Regenerated,
}

/// Advance the burst one tick and mirror it into `positions`.
///
/// Extinct particles are parked at `config.hidden_position` so the buffer
/// layout never changes.
pub fn step_fireworks<R: Rng + ?Sized>(
    burst: &mut FireworkBurst,
    positions: &mut [Vec3],
    config: &FireworkConfig,
    rng: &mut R,
) -> FireworkStatus {
    let hidden = Vec3::splat(config.hidden_position);
    let mut all_dead = true;

    for (p, out) in burst.particles.iter_mut().zip(positions.iter_mut()) {
        p.velocity.y += config.gravity;
        p.position += p.velocity * config.time_scale;
        p.alpha -= config.decay_rate;
        if p.alpha <= EXTINCT_ALPHA {
            p.alpha = 0.0;
        }

        if p.is_alive() {
            all_dead = false;
            *out = p.position;
        } else {
            *out = hidden;
        }
    }

    if all_dead {
        *burst = firework_burst(burst.particles.len(), config, rng);
        log::debug!(
            "firework burst regenerated: {} particles, color #{:06x}",
            burst.particles.len(),
            burst.base_color.to_u32()
        );
        FireworkStatus::Regenerated
    } else {
        FireworkStatus::Burning
    }
}
