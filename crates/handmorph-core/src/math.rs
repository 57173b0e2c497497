use glam::Vec3;
use rand::Rng;

/// Below this squared length a random delta is rejected instead of normalised.
const MIN_DIRECTION_LENGTH_SQ: f32 = 1.0e-8;

/// Scalar linear interpolation.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Remap `x` from `[in_min, in_max]` to `[out_min, out_max]` without clamping.
#[inline]
pub fn map_linear(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (x - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// Random direction built from three uniform deltas in `[-0.5, 0.5)`.
///
/// The cube-based draw is not exactly uniform on the sphere (corners are
/// slightly favoured); that look is kept. Near-zero draws are resampled, so
/// the result is always unit length.
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen::<f32>() - 0.5,
            rng.gen::<f32>() - 0.5,
            rng.gen::<f32>() - 0.5,
        );
        let len_sq = v.length_squared();
        if len_sq > MIN_DIRECTION_LENGTH_SQ {
            return v / len_sq.sqrt();
        }
    }
}

/// Point on a sphere of radius `r` using `phi = acos(2u - 1)` for uniform
/// surface density.
#[inline]
pub fn sphere_point(r: f32, theta: f32, u: f32) -> Vec3 {
    let phi = (2.0 * u - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// HSL to RGB, all components in `[0, 1]`.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    if s <= 0.0 {
        return Vec3::splat(l);
    }
    let h = h.rem_euclid(1.0);
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Vec3::new(
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}
