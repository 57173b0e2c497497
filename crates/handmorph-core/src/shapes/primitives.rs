//! Per-particle samplers for the static templates.
//!
//! Each sampler draws one point from its own random parameters, so a cloud is
//! just `count` independent draws. Parameter space is sampled uniformly (the
//! heart's density follows θ, not arc length); that uneven density is part of
//! the look.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;
use rand::Rng;

use crate::math::sphere_point;

/// Half-depth of the heart's random z thickness.
pub const HEART_DEPTH: f32 = 3.0;

pub const FLOWER_RADIUS: f32 = 10.0;
pub const FLOWER_PETALS: f32 = 5.0;
pub const FLOWER_FLATTEN: f32 = 0.5;

pub const SATURN_PLANET_RADIUS: f32 = 8.0;
/// Planet body share of the cloud as `numerator / denominator` (60%); the
/// rest form the rings.
pub const SATURN_BODY_SHARE: (usize, usize) = (3, 5);
pub const SATURN_RING_INNER: f32 = 13.0;
pub const SATURN_RING_WIDTH: f32 = 8.0;
/// Ring rotation about the x axis, radians.
pub const SATURN_RING_TILT: f32 = 0.3;

/// `x = 16 sin³θ`, `y = 13cosθ − 5cos2θ − 2cos3θ − cos4θ`, with random depth.
pub fn heart_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let t = rng.gen::<f32>() * TAU;
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    let z = (rng.gen::<f32>() - 0.5) * 2.0 * HEART_DEPTH;
    Vec3::new(x, y, z)
}

/// Sphere with a five-lobe radial modulation, flattened along z.
pub fn flower_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let r = FLOWER_RADIUS * (1.0 + 0.5 * (FLOWER_PETALS * theta).sin());
    let p = sphere_point(r, theta, rng.gen::<f32>());
    Vec3::new(p.x, p.y, p.z * FLOWER_FLATTEN)
}

/// Number of leading indices on the planet body: `ceil(count * 3 / 5)`,
/// in integer arithmetic so round counts split exactly.
pub fn saturn_body_count(count: usize) -> usize {
    let (num, den) = SATURN_BODY_SHARE;
    count / den * num + (count % den * num).div_ceil(den)
}

/// Planet body point (uniform on the sphere surface).
pub fn saturn_body_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    sphere_point(SATURN_PLANET_RADIUS, theta, rng.gen::<f32>())
}

/// Ring point: random radius in the annulus, tilted about x.
pub fn saturn_ring_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let r = SATURN_RING_INNER + rng.gen::<f32>() * SATURN_RING_WIDTH;
    let theta = rng.gen::<f32>() * TAU;
    let x = r * theta.cos();
    let z = r * theta.sin();
    Vec3::new(x, z * SATURN_RING_TILT.sin(), z * SATURN_RING_TILT.cos())
}

/// Seated figure region picked by a uniform draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuddhaRegion {
    Head,
    Topknot,
    Torso,
    LotusBase,
}

impl BuddhaRegion {
    /// Cumulative weights: head 20%, topknot 5%, torso 45%, base 30%.
    pub fn from_draw(u: f32) -> Self {
        if u < 0.2 {
            BuddhaRegion::Head
        } else if u < 0.25 {
            BuddhaRegion::Topknot
        } else if u < 0.7 {
            BuddhaRegion::Torso
        } else {
            BuddhaRegion::LotusBase
        }
    }
}

pub fn buddha_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    match BuddhaRegion::from_draw(rng.gen::<f32>()) {
        BuddhaRegion::Head => sphere_region(rng, 3.0, 10.0),
        BuddhaRegion::Topknot => sphere_region(rng, 1.0, 13.0),
        BuddhaRegion::Torso => {
            // Radius narrows with a cosine profile toward both ends.
            let y = (rng.gen::<f32>() - 0.5) * 12.0;
            let r = 5.0 * (y / 14.0 * FRAC_PI_2).cos();
            let theta = rng.gen::<f32>() * TAU;
            Vec3::new(r * theta.cos(), y + 3.0, r * theta.sin())
        }
        BuddhaRegion::LotusBase => {
            // sqrt keeps areal density even across the disc
            let r = 9.0 * rng.gen::<f32>().sqrt();
            let theta = rng.gen::<f32>() * TAU;
            Vec3::new(r * theta.cos(), -3.0 - rng.gen::<f32>(), r * theta.sin())
        }
    }
}

/// Sphere surface point of radius `r` centred at `(0, center_y, 0)`, y-up.
fn sphere_region<R: Rng + ?Sized>(rng: &mut R, r: f32, center_y: f32) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let p = sphere_point(r, theta, rng.gen::<f32>());
    Vec3::new(p.x, center_y + p.z, p.y)
}
