use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::ConfigError;
use crate::material::Rgb;

/// Landmarks per hand in the MediaPipe hand layout.
pub const HAND_LANDMARKS: usize = 21;

/// Steady-state spring-damper constants. Applied once per frame, not per second.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub spring_strength: f32,
    pub damping: f32,
    pub gravity: f32,
    pub drift_amplitude: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            spring_strength: 0.08,
            damping: 0.92,
            gravity: -0.005,
            drift_amplitude: 0.2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphConfig {
    pub duration: f32,
    pub easing: Easing,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            duration: 1.5,
            easing: Easing::POWER2_IN_OUT,
        }
    }
}

/// Gesture-triggered burst and elastic return.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
    /// Distance each particle is thrown from its anchor.
    pub force: f32,
    pub burst_duration: f32,
    pub burst_easing: Easing,
    pub return_duration: f32,
    pub return_easing: Easing,
    /// Duration of the white flash and point-size pulse.
    pub flash_duration: f32,
    pub flash_color_easing: Easing,
    pub flash_size_easing: Easing,
    pub flash_size: f32,
    pub flash_opacity: f32,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            force: 20.0,
            burst_duration: 0.25,
            burst_easing: Easing::POWER3_OUT,
            return_duration: 1.2,
            return_easing: Easing::ElasticOut {
                amplitude: 1.0,
                period: 0.4,
            },
            flash_duration: 0.5,
            flash_color_easing: Easing::POWER2_IN,
            flash_size_easing: Easing::POWER2_OUT,
            flash_size: 0.5,
            flash_opacity: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireworkConfig {
    pub gravity: f32,
    /// Multiplier applied to velocity when advancing position.
    pub time_scale: f32,
    pub decay_rate: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub saturation: f32,
    pub lightness: f32,
    /// Where extinct particles are parked, far outside the visible volume.
    pub hidden_position: f32,
}

impl Default for FireworkConfig {
    fn default() -> Self {
        Self {
            gravity: -0.015,
            time_scale: 0.04,
            decay_rate: 0.008,
            min_speed: 5.0,
            max_speed: 30.0,
            saturation: 1.0,
            lightness: 0.6,
            hidden_position: 99_999.0,
        }
    }
}

/// Two-hand scale remap and fist heuristic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub wrist_index: usize,
    /// Middle-finger MCP knuckle; also the palm-centre reference.
    pub knuckle_index: usize,
    /// Middle-finger tip.
    pub tip_index: usize,
    pub distance_min: f32,
    pub distance_max: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    /// Hard bounds applied after the remap.
    pub scale_clamp_min: f32,
    pub scale_clamp_max: f32,
    /// A hand is closed when tip-to-wrist < ratio * knuckle-to-wrist.
    pub closed_ratio: f32,
    pub scale_smoothing: f32,
    pub scale_easing: Easing,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            wrist_index: 0,
            knuckle_index: 9,
            tip_index: 12,
            distance_min: 0.2,
            distance_max: 0.8,
            scale_min: 0.5,
            scale_max: 2.5,
            scale_clamp_min: 0.5,
            scale_clamp_max: 3.0,
            closed_ratio: 1.5,
            scale_smoothing: 0.3,
            scale_easing: Easing::POWER1_OUT,
        }
    }
}

/// Baseline point material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    pub color: Rgb,
    pub size: f32,
    pub opacity: f32,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            color: Rgb::from_u32(0xff007f),
            size: 0.2,
            opacity: 0.7,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub particle_count: usize,
    pub physics: PhysicsConfig,
    pub morph: MorphConfig,
    pub explosion: ExplosionConfig,
    pub fireworks: FireworkConfig,
    pub gesture: GestureConfig,
    pub material: MaterialConfig,
}

impl EngineConfig {
    pub const DEFAULT_PARTICLE_COUNT: usize = 6000;

    pub fn with_particle_count(particle_count: usize) -> Self {
        Self {
            particle_count,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON config; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would diverge or produce NaN.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::EmptyParticleCount);
        }

        let p = &self.physics;
        if !(p.damping.is_finite() && (0.0..1.0).contains(&p.damping)) {
            return Err(ConfigError::UnstableDamping(p.damping));
        }
        if !(p.spring_strength.is_finite() && p.spring_strength > 0.0 && p.spring_strength <= 1.0) {
            return Err(ConfigError::InvalidSpring(p.spring_strength));
        }
        finite("physics.gravity", p.gravity)?;
        finite("physics.drift_amplitude", p.drift_amplitude)?;

        positive("morph.duration", self.morph.duration)?;

        let e = &self.explosion;
        finite("explosion.force", e.force)?;
        positive("explosion.burst_duration", e.burst_duration)?;
        positive("explosion.return_duration", e.return_duration)?;
        positive("explosion.flash_duration", e.flash_duration)?;
        finite("explosion.flash_size", e.flash_size)?;
        finite("explosion.flash_opacity", e.flash_opacity)?;

        let f = &self.fireworks;
        finite("fireworks.gravity", f.gravity)?;
        positive("fireworks.time_scale", f.time_scale)?;
        positive("fireworks.decay_rate", f.decay_rate)?;
        positive("fireworks.min_speed", f.min_speed)?;
        finite("fireworks.max_speed", f.max_speed)?;
        ordered("fireworks.speed", f.min_speed, f.max_speed)?;
        finite("fireworks.hidden_position", f.hidden_position)?;

        let g = &self.gesture;
        for (field, index) in [
            ("gesture.wrist_index", g.wrist_index),
            ("gesture.knuckle_index", g.knuckle_index),
            ("gesture.tip_index", g.tip_index),
        ] {
            if index >= HAND_LANDMARKS {
                return Err(ConfigError::LandmarkIndex {
                    field,
                    index,
                    len: HAND_LANDMARKS,
                });
            }
        }
        finite("gesture.distance_min", g.distance_min)?;
        finite("gesture.distance_max", g.distance_max)?;
        if g.distance_min >= g.distance_max {
            return Err(ConfigError::InvertedRange {
                field: "gesture.distance",
                min: g.distance_min,
                max: g.distance_max,
            });
        }
        finite("gesture.scale_min", g.scale_min)?;
        finite("gesture.scale_max", g.scale_max)?;
        finite("gesture.scale_clamp_min", g.scale_clamp_min)?;
        finite("gesture.scale_clamp_max", g.scale_clamp_max)?;
        ordered("gesture.scale_clamp", g.scale_clamp_min, g.scale_clamp_max)?;
        positive("gesture.closed_ratio", g.closed_ratio)?;
        positive("gesture.scale_smoothing", g.scale_smoothing)?;

        finite("material.size", self.material.size)?;
        finite("material.opacity", self.material.opacity)?;
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            particle_count: Self::DEFAULT_PARTICLE_COUNT,
            physics: PhysicsConfig::default(),
            morph: MorphConfig::default(),
            explosion: ExplosionConfig::default(),
            fireworks: FireworkConfig::default(),
            gesture: GestureConfig::default(),
            material: MaterialConfig::default(),
        }
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { field, min, max })
    }
}
