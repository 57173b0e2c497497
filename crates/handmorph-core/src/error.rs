//! Error types for the morphing engine.

use thiserror::Error;

/// Rejected engine configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("particle count must be greater than zero")]
    EmptyParticleCount,

    #[error("damping must be in [0, 1) for a stable integrator, got {0}")]
    UnstableDamping(f32),

    #[error("spring constant must be in (0, 1], got {0}")]
    InvalidSpring(f32),

    #[error("{field} must be finite and positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("{field} range is inverted: {min} > {max}")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("landmark index {index} for {field} is outside a {len}-point hand")]
    LandmarkIndex {
        field: &'static str,
        index: usize,
        len: usize,
    },

    #[error("config parse error: {0}")]
    Parse(String),
}

/// Malformed hand-tracking input at the crate boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GestureError {
    #[error("hand must have exactly {expected} landmarks, got {found}")]
    LandmarkCount { expected: usize, found: usize },

    #[error("flat landmark buffer of {len} floats does not hold {hands} hands")]
    FlatBufferLength { len: usize, hands: usize },
}

/// Unparseable color value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),
}

/// Umbrella error for host-facing calls.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gesture(#[from] GestureError),

    #[error(transparent)]
    Color(#[from] ColorError),
}
