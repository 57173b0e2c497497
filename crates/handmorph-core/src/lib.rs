//! Particle morphing engine driven by procedural shapes and hand gestures.
//!
//! A fixed-size particle buffer is morphed between template point clouds,
//! held on its shape by a drifting spring-damper, blown apart and pulled back
//! by a two-fist gesture, or handed over to a self-renewing firework burst.
//! The host drives everything through [`engine::Engine::tick`].

pub mod config;
pub mod easing;
pub mod engine;
pub mod error;
pub mod explosion;
pub mod fireworks;
pub mod forces;
pub mod gesture;
pub mod material;
pub mod math;
pub mod morph;
pub mod particle;
pub mod shapes;

pub use config::EngineConfig;
pub use engine::{Engine, Mode};
pub use error::{ColorError, ConfigError, EngineError, GestureError};
pub use gesture::{GestureFrame, HandLandmarks};
pub use material::Rgb;
pub use shapes::Template;
