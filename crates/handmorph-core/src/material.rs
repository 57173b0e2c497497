use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::{ExplosionConfig, MaterialConfig};
use crate::easing::{Tween, TweenStatus};
use crate::error::ColorError;
use crate::math::lerp;

/// RGB color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB` packed color.
    pub fn from_u32(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_u32)
            .map_err(|_| ColorError::InvalidHex(s.to_string()))
    }

    pub fn to_u32(self) -> u32 {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (c(self.r) << 16) | (c(self.g) << 8) | c(self.b)
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Vec3> for Rgb {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Point-cloud material read by the renderer each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialState {
    pub color: Rgb,
    pub size: f32,
    pub opacity: f32,
}

impl From<&MaterialConfig> for MaterialState {
    fn from(config: &MaterialConfig) -> Self {
        Self {
            color: config.color,
            size: config.size,
            opacity: config.opacity,
        }
    }
}

/// White flash and point-size pulse played on explosion.
///
/// Runs independently of particle positions: it keeps animating even if the
/// position transition that started it is cancelled.
#[derive(Clone, Debug)]
pub struct MaterialFlash {
    color_tween: Tween,
    size_tween: Tween,
    from_color: Rgb,
    from_size: f32,
    from_opacity: f32,
}

impl MaterialFlash {
    /// Snap `material` to the burst look and return the flash that eases it
    /// back.
    pub fn start(material: &mut MaterialState, config: &ExplosionConfig) -> Self {
        material.color = Rgb::WHITE;
        material.size = config.flash_size;
        material.opacity = config.flash_opacity;
        Self {
            color_tween: Tween::new(config.flash_duration, config.flash_color_easing),
            size_tween: Tween::new(config.flash_duration, config.flash_size_easing),
            from_color: Rgb::WHITE,
            from_size: config.flash_size,
            from_opacity: config.flash_opacity,
        }
    }

    /// Ease toward `baseline`. The active color is re-read every step so a
    /// color change mid-flash lands on the new color.
    pub fn step(&mut self, dt: f32, material: &mut MaterialState, baseline: &MaterialState) -> TweenStatus {
        let (c, color_status) = self.color_tween.advance(dt);
        let (s, size_status) = self.size_tween.advance(dt);
        if color_status == TweenStatus::Finished && size_status == TweenStatus::Finished {
            *material = *baseline;
            return TweenStatus::Finished;
        }
        material.color = self.from_color.lerp(baseline.color, c);
        material.size = lerp(self.from_size, baseline.size, s);
        material.opacity = lerp(self.from_opacity, baseline.opacity, s);
        TweenStatus::Running
    }
}
