use glam::Vec3;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::EngineConfig;
use crate::easing::{Tween, TweenStatus};
use crate::error::{ColorError, ConfigError};
use crate::explosion::ExplosionController;
use crate::fireworks::{step_fireworks, FireworkBurst};
use crate::forces::spring::apply_spring_physics;
use crate::gesture::{GestureClassifier, GestureFrame, HandLandmarks};
use crate::material::{MaterialFlash, MaterialState, Rgb};
use crate::math::lerp;
use crate::morph::MorphController;
use crate::particle::ParticleBuffer;
use crate::shapes::dispatcher::{generate, Template, TemplateCloud};

/// Which driver owns the particle buffer this tick.
///
/// Exactly one driver writes positions per tick; steady physics never runs
/// while a morph or explosion is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Halted by the host: ticks are inert.
    Idle,
    Morphing,
    Exploding,
    SteadyPhysics,
    Fireworks,
}

impl Mode {
    pub fn is_transitioning(self) -> bool {
        matches!(self, Mode::Morphing | Mode::Exploding)
    }
}

/// Smoothed uniform display scale, retargeted by every two-hand frame.
struct ScaleTween {
    from: f32,
    to: f32,
    tween: Tween,
}

/// Frame-driven particle engine. The host calls [`Engine::tick`] once per
/// rendered frame and then reads positions and material state.
pub struct Engine {
    particles: ParticleBuffer,
    config: EngineConfig,
    mode: Mode,
    template: Template,
    morph: MorphController,
    explosion: ExplosionController,
    fireworks: Option<FireworkBurst>,
    gesture: GestureClassifier,
    material: MaterialState,
    baseline: MaterialState,
    flash: Option<MaterialFlash>,
    scale: f32,
    scale_tween: Option<ScaleTween>,
    hands_detected: usize,
    time: f32,
    rng: SmallRng,
}

impl Engine {
    /// Engine seeded from OS entropy.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Reproducible engine: identical seeds and inputs give identical frames.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, mut rng: SmallRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let template = Template::Heart;
        let points = match generate(template, config.particle_count, &config.fireworks, &mut rng) {
            TemplateCloud::Points(points) => points,
            TemplateCloud::Fireworks(_) => vec![Vec3::ZERO; config.particle_count],
        };
        let baseline = MaterialState::from(&config.material);

        log::info!(
            "engine created: {} particles, template {}",
            config.particle_count,
            template.name()
        );

        Ok(Self {
            particles: ParticleBuffer::from_points(&points),
            gesture: GestureClassifier::new(config.gesture.clone()),
            config,
            mode: Mode::SteadyPhysics,
            template,
            morph: MorphController::new(),
            explosion: ExplosionController::new(),
            fireworks: None,
            material: baseline,
            baseline,
            flash: None,
            scale: 1.0,
            scale_tween: None,
            hands_detected: 0,
            time: 0.0,
            rng,
        })
    }

    /// Advance one frame.
    ///
    /// Order: gesture classification, possible explosion trigger, then the
    /// single buffer driver for the current mode, then the material flash and
    /// display-scale smoothing. `hands` is `None` when the tracker produced
    /// nothing this frame.
    pub fn tick(&mut self, dt: f32, hands: Option<&[HandLandmarks]>) -> GestureFrame {
        if self.mode == Mode::Idle {
            return GestureFrame::default();
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.time += dt;

        let frame = self.gesture.classify(hands);
        if frame.tracked {
            self.hands_detected = frame.hands;
        }
        if let Some(scale) = frame.scale {
            self.retarget_scale(scale);
        }
        if frame.explode {
            self.trigger_explosion();
        }

        match self.mode {
            Mode::Exploding => {
                let status =
                    self.explosion
                        .step(dt, &mut self.particles.position, &self.config.explosion);
                if status == TweenStatus::Finished {
                    log::debug!("explosion settled");
                    self.finish_transition();
                }
            }
            Mode::Morphing => {
                if self.morph.step(dt, &mut self.particles.position) == TweenStatus::Finished {
                    log::debug!("morph to {} finished", self.template.name());
                    self.finish_transition();
                }
            }
            Mode::SteadyPhysics => {
                apply_spring_physics(&mut self.particles, self.time, &self.config.physics);
            }
            Mode::Fireworks => {
                if let Some(burst) = self.fireworks.as_mut() {
                    step_fireworks(
                        burst,
                        &mut self.particles.position,
                        &self.config.fireworks,
                        &mut self.rng,
                    );
                }
            }
            Mode::Idle => {}
        }

        self.step_flash(dt);
        self.step_scale(dt);
        frame
    }

    /// Switch templates. Re-selecting the active template is a no-op and
    /// returns `false`.
    ///
    /// Shapes start a morph from the current positions (velocities zeroed,
    /// any running morph or explosion torn down). Fireworks start a fresh
    /// burst. While halted only the anchors change; [`Engine::resume`] morphs
    /// onto them.
    pub fn select_template(&mut self, template: Template) -> bool {
        if template == self.template {
            return false;
        }
        log::info!("template {} -> {}", self.template.name(), template.name());
        self.template = template;

        let cloud = generate(
            template,
            self.particles.count,
            &self.config.fireworks,
            &mut self.rng,
        );
        self.morph.cancel();
        self.explosion.cancel();

        match cloud {
            TemplateCloud::Fireworks(burst) => {
                self.fireworks = Some(burst);
                if self.mode != Mode::Idle {
                    self.mode = Mode::Fireworks;
                }
            }
            TemplateCloud::Points(points) => {
                self.fireworks = None;
                self.particles.set_targets(&points);
                if self.mode != Mode::Idle {
                    self.begin_morph_to_targets();
                }
            }
        }
        true
    }

    /// Start the burst-and-return explosion. Refused (returns `false`, no
    /// state touched) in fireworks mode, while halted, or while a morph or
    /// explosion is already in flight.
    pub fn trigger_explosion(&mut self) -> bool {
        if self.template.is_fireworks() || self.mode != Mode::SteadyPhysics {
            log::debug!("explosion ignored in mode {:?}", self.mode);
            return false;
        }
        log::debug!("explosion triggered");

        self.particles.reset_velocities();
        self.morph.cancel();
        self.explosion.start(
            &self.particles.position,
            &self.particles.target_pos,
            &self.config.explosion,
            &mut self.rng,
        );
        self.flash = Some(MaterialFlash::start(&mut self.material, &self.config.explosion));
        self.mode = Mode::Exploding;
        true
    }

    /// Apply a new active color directly; no animation.
    pub fn set_color(&mut self, color: Rgb) {
        self.baseline.color = color;
        self.material.color = color;
    }

    pub fn set_color_hex(&mut self, hex: &str) -> Result<(), ColorError> {
        self.set_color(Rgb::from_hex(hex)?);
        Ok(())
    }

    /// Freeze the engine. Running transitions are dropped where they stand.
    pub fn halt(&mut self) {
        if self.mode == Mode::Idle {
            return;
        }
        self.morph.cancel();
        self.explosion.cancel();
        self.particles.reset_velocities();
        self.mode = Mode::Idle;
        log::info!("engine halted");
    }

    /// Leave `Idle`. Shape templates morph from wherever the particles were
    /// left onto the current anchors.
    pub fn resume(&mut self) {
        if self.mode != Mode::Idle {
            return;
        }
        log::info!("engine resumed on {}", self.template.name());
        if self.template.is_fireworks() {
            self.mode = Mode::Fireworks;
        } else {
            self.begin_morph_to_targets();
        }
    }

    /// Reseed and regenerate the current template with particles at rest on
    /// it. Transitions, the flash, the display-scale tween and the gesture
    /// edge memory are dropped; the display scale holds its current value.
    pub fn reinitialize(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
        self.morph.cancel();
        self.explosion.cancel();
        self.flash = None;
        self.scale_tween = None;
        self.gesture.reset();
        self.material = self.baseline;
        self.particles.reset_velocities();

        match generate(
            self.template,
            self.particles.count,
            &self.config.fireworks,
            &mut self.rng,
        ) {
            TemplateCloud::Fireworks(burst) => {
                self.fireworks = Some(burst);
                if self.mode != Mode::Idle {
                    self.mode = Mode::Fireworks;
                }
            }
            TemplateCloud::Points(points) => {
                self.particles.set_targets(&points);
                self.particles.position.copy_from_slice(&self.particles.target_pos);
                if self.mode != Mode::Idle {
                    self.mode = Mode::SteadyPhysics;
                }
            }
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn template(&self) -> Template {
        self.template
    }

    pub fn is_transitioning(&self) -> bool {
        self.mode.is_transitioning()
    }

    pub fn particles(&self) -> &ParticleBuffer {
        &self.particles
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.particles.position
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.particles.velocity
    }

    pub fn targets(&self) -> &[Vec3] {
        &self.particles.target_pos
    }

    pub fn material(&self) -> &MaterialState {
        &self.material
    }

    pub fn color(&self) -> Rgb {
        self.baseline.color
    }

    /// Smoothed uniform display scale.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Hand count from the last tracked frame.
    pub fn hands_detected(&self) -> usize {
        self.hands_detected
    }

    pub fn fireworks(&self) -> Option<&FireworkBurst> {
        self.fireworks.as_ref()
    }

    /// Accumulated simulated time in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn begin_morph_to_targets(&mut self) {
        self.explosion.cancel();
        self.particles.reset_velocities();
        self.morph.begin(
            &self.particles.position,
            &self.particles.target_pos,
            self.config.morph.duration,
            self.config.morph.easing,
        );
        self.mode = Mode::Morphing;
    }

    fn finish_transition(&mut self) {
        self.mode = Mode::SteadyPhysics;
        self.particles.reset_velocities();
    }

    fn step_flash(&mut self, dt: f32) {
        if let Some(flash) = self.flash.as_mut() {
            if flash.step(dt, &mut self.material, &self.baseline) == TweenStatus::Finished {
                self.flash = None;
            }
        }
    }

    fn retarget_scale(&mut self, target: f32) {
        let g = &self.config.gesture;
        self.scale_tween = Some(ScaleTween {
            from: self.scale,
            to: target,
            tween: Tween::new(g.scale_smoothing, g.scale_easing),
        });
    }

    fn step_scale(&mut self, dt: f32) {
        if let Some(s) = self.scale_tween.as_mut() {
            let (t, status) = s.tween.advance(dt);
            self.scale = lerp(s.from, s.to, t);
            if status == TweenStatus::Finished {
                self.scale = s.to;
                self.scale_tween = None;
            }
        }
    }
}
