//! Template selection: maps a [`Template`] to its generator.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::FireworkConfig;
use crate::fireworks::{FireworkBurst, FireworkParticle};
use crate::material::Rgb;
use crate::math::{hsl_to_rgb, random_direction};
use crate::shapes::primitives::*;

/// The five selectable particle templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    Heart,
    Flower,
    Saturn,
    Buddha,
    Fireworks,
}

impl Template {
    pub const ALL: [Template; 5] = [
        Template::Heart,
        Template::Flower,
        Template::Saturn,
        Template::Buddha,
        Template::Fireworks,
    ];

    /// Index used by host bindings; unknown indices fall back to `None`.
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Template::Heart => "heart",
            Template::Flower => "flower",
            Template::Saturn => "saturn",
            Template::Buddha => "buddha",
            Template::Fireworks => "fireworks",
        }
    }

    pub fn is_fireworks(self) -> bool {
        self == Template::Fireworks
    }
}

/// Generator output: a static anchor cloud, or a firework burst.
#[derive(Clone, Debug)]
pub enum TemplateCloud {
    Points(Vec<Vec3>),
    Fireworks(FireworkBurst),
}

/// Generate the template's cloud of exactly `count` entries.
///
/// Stateless: every call draws fresh from `rng` and ignores any previous
/// shape.
pub fn generate<R: Rng + ?Sized>(
    template: Template,
    count: usize,
    fireworks: &FireworkConfig,
    rng: &mut R,
) -> TemplateCloud {
    match template {
        Template::Fireworks => TemplateCloud::Fireworks(firework_burst(count, fireworks, rng)),
        shape => TemplateCloud::Points(shape_points(shape, count, rng)),
    }
}

/// Static point cloud for a shape template.
///
/// `Template::Fireworks` has no static cloud; it yields origin points, which
/// is where every burst starts.
pub fn shape_points<R: Rng + ?Sized>(template: Template, count: usize, rng: &mut R) -> Vec<Vec3> {
    match template {
        Template::Heart => (0..count).map(|_| heart_point(rng)).collect(),
        Template::Flower => (0..count).map(|_| flower_point(rng)).collect(),
        Template::Saturn => {
            // Planet occupies the leading indices, rings the rest.
            let body = saturn_body_count(count);
            (0..count)
                .map(|i| {
                    if i < body {
                        saturn_body_point(rng)
                    } else {
                        saturn_ring_point(rng)
                    }
                })
                .collect()
        }
        Template::Buddha => (0..count).map(|_| buddha_point(rng)).collect(),
        Template::Fireworks => vec![Vec3::ZERO; count],
    }
}

/// Fresh burst at the origin: random directions, random speeds in
/// `[min_speed, max_speed)`, and one random-hue base color.
pub fn firework_burst<R: Rng + ?Sized>(
    count: usize,
    config: &FireworkConfig,
    rng: &mut R,
) -> FireworkBurst {
    let base_color = Rgb::from(hsl_to_rgb(rng.gen::<f32>(), config.saturation, config.lightness));
    let particles = (0..count)
        .map(|_| {
            let speed = if config.max_speed > config.min_speed {
                rng.gen_range(config.min_speed..config.max_speed)
            } else {
                config.min_speed
            };
            FireworkParticle {
                position: Vec3::ZERO,
                velocity: random_direction(rng) * speed,
                alpha: 1.0,
                color: base_color,
            }
        })
        .collect();
    FireworkBurst {
        particles,
        base_color,
    }
}
