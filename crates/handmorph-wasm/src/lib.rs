use handmorph_core::fireworks::FireworkBurst;
use handmorph_core::{Engine, EngineConfig, EngineError, HandLandmarks, Template};
use wasm_bindgen::prelude::*;

/// GPU-compatible particle struct: 32 bytes, matches the WGSL/GLSL vertex layout.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuParticle {
    position: [f32; 3], // 12 bytes
    alpha: f32,         //  4 bytes
    color: [f32; 3],    // 12 bytes
    _pad: f32,          //  4 bytes
}

#[wasm_bindgen]
pub struct ParticleWorld {
    engine: Engine,
    gpu_buffer: Vec<GpuParticle>,
}

fn to_js(err: EngineError) -> JsValue {
    web_sys::console::error_1(&format!("handmorph: {}", err).into());
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
impl ParticleWorld {
    #[wasm_bindgen(constructor)]
    pub fn new(particle_count: usize, seed: u32) -> Result<ParticleWorld, JsValue> {
        Self::build(EngineConfig::with_particle_count(particle_count), seed).map_err(to_js)
    }

    /// Build from a partial JSON config; missing fields take defaults.
    #[wasm_bindgen]
    pub fn from_config_json(json: &str, seed: u32) -> Result<ParticleWorld, JsValue> {
        EngineConfig::from_json(json)
            .map_err(EngineError::from)
            .and_then(|config| Self::build(config, seed))
            .map_err(to_js)
    }

    /// Advance one frame. `landmarks` holds `hand_count * 21 * 3` floats;
    /// a negative `hand_count` means the tracker had no frame. Returns the
    /// step time in milliseconds.
    #[wasm_bindgen]
    pub fn tick(&mut self, dt: f32, landmarks: &[f32], hand_count: i32) -> Result<f32, JsValue> {
        let start = js_sys::Date::now();
        let hands = if hand_count < 0 {
            None
        } else {
            Some(
                HandLandmarks::from_flat(landmarks, hand_count as usize)
                    .map_err(|e| to_js(e.into()))?,
            )
        };
        let frame = self.engine.tick(dt, hands.as_deref());
        if frame.explode {
            web_sys::console::log_1(&"handmorph: fists closed".into());
        }
        self.write_gpu_output();
        Ok((js_sys::Date::now() - start) as f32)
    }

    #[wasm_bindgen]
    pub fn get_gpu_buffer_ptr(&self) -> *const f32 {
        self.gpu_buffer.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn get_gpu_buffer_byte_length(&self) -> usize {
        bytemuck::cast_slice::<GpuParticle, u8>(&self.gpu_buffer).len()
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.engine.particles().count
    }

    /// Template index: 0 heart, 1 flower, 2 saturn, 3 buddha, 4 fireworks.
    /// Returns whether the template changed.
    #[wasm_bindgen]
    pub fn set_template(&mut self, index: u32) -> bool {
        match Template::from_index(index) {
            Some(template) => self.engine.select_template(template),
            None => {
                web_sys::console::warn_1(&format!("handmorph: unknown template {}", index).into());
                false
            }
        }
    }

    #[wasm_bindgen]
    pub fn template(&self) -> u32 {
        Template::ALL
            .iter()
            .position(|t| *t == self.engine.template())
            .unwrap_or(0) as u32
    }

    #[wasm_bindgen]
    pub fn set_color_hex(&mut self, hex: &str) -> Result<(), JsValue> {
        self.engine
            .set_color_hex(hex)
            .map_err(|e| to_js(e.into()))
    }

    #[wasm_bindgen]
    pub fn trigger_explosion(&mut self) -> bool {
        self.engine.trigger_explosion()
    }

    #[wasm_bindgen]
    pub fn is_transitioning(&self) -> bool {
        self.engine.is_transitioning()
    }

    #[wasm_bindgen]
    pub fn hands_detected(&self) -> usize {
        self.engine.hands_detected()
    }

    /// Uniform scale for the point cloud's transform.
    #[wasm_bindgen]
    pub fn scale(&self) -> f32 {
        self.engine.scale()
    }

    /// `[r, g, b, size, opacity]` for the point material.
    #[wasm_bindgen]
    pub fn material(&self) -> Vec<f32> {
        let m = self.engine.material();
        vec![m.color.r, m.color.g, m.color.b, m.size, m.opacity]
    }

    #[wasm_bindgen]
    pub fn halt(&mut self) {
        self.engine.halt();
    }

    #[wasm_bindgen]
    pub fn resume(&mut self) {
        self.engine.resume();
    }

    #[wasm_bindgen]
    pub fn reinitialize(&mut self, seed: u32) {
        self.engine.reinitialize(u64::from(seed));
        self.write_gpu_output();
    }
}

impl ParticleWorld {
    fn build(config: EngineConfig, seed: u32) -> Result<ParticleWorld, EngineError> {
        let count = config.particle_count;
        let engine = Engine::with_seed(config, u64::from(seed))?;
        web_sys::console::log_1(
            &format!("WASM ParticleWorld created: {} particles", count).into(),
        );

        let mut world = ParticleWorld {
            engine,
            gpu_buffer: vec![bytemuck::Zeroable::zeroed(); count],
        };
        world.write_gpu_output();
        Ok(world)
    }

    fn write_gpu_output(&mut self) {
        let material = *self.engine.material();
        let burst: Option<&FireworkBurst> = self.engine.fireworks();
        let positions = self.engine.positions();

        for (i, out) in self.gpu_buffer.iter_mut().enumerate() {
            let pos = positions[i];
            let (alpha, color) = match burst.and_then(|b| b.particles.get(i)) {
                Some(p) => (p.alpha, p.color.to_array()),
                None => (material.opacity, material.color.to_array()),
            };
            *out = GpuParticle {
                position: pos.to_array(),
                alpha,
                color,
                _pad: 0.0,
            };
        }
    }
}
