// Tunables for a particle field. Defaults reproduce the neon cursor trail.

use crate::color::{Color, DEFAULT_PALETTE};
use crate::error::ConfigError;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    /// Hard ceiling on live particles.
    pub capacity: usize,
    /// Particles added per accepted spawn request.
    pub spawn_batch: usize,
    pub target_fps: f64,
    /// Minimum gap between accepted pointer-move spawns.
    pub spawn_interval_ms: f64,
    pub resize_debounce_ms: u32,
    pub decay_per_tick: f64,
    /// Particles at or below this radius are culled.
    pub min_visible_size: f64,
    pub size_min: f64,
    pub size_max: f64,
    /// Velocity is drawn per axis from `[-max_speed, max_speed)`.
    pub max_speed: f64,
    /// Wrap every frame in a console.time span.
    pub profile: bool,
    #[wasm_bindgen(skip)]
    pub palette: [Color; 2],
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            capacity: 100,
            spawn_batch: 3,
            target_fps: 30.0,
            spawn_interval_ms: 50.0,
            resize_debounce_ms: 250,
            decay_per_tick: 0.05,
            min_visible_size: 0.2,
            size_min: 1.0,
            size_max: 3.0,
            max_speed: 0.5,
            profile: false,
            palette: DEFAULT_PALETTE,
        }
    }
}

#[wasm_bindgen]
impl FieldConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> FieldConfig {
        FieldConfig::default()
    }
}

impl FieldConfig {
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.target_fps
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::Zero("capacity"));
        }
        if self.spawn_batch == 0 {
            return Err(ConfigError::Zero("spawn_batch"));
        }
        if !(self.target_fps > 0.0) || !self.target_fps.is_finite() {
            return Err(ConfigError::Zero("target_fps"));
        }
        let non_negative = [
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("decay_per_tick", self.decay_per_tick),
            ("min_visible_size", self.min_visible_size),
            ("size_min", self.size_min),
            ("size_max", self.size_max),
            ("max_speed", self.max_speed),
        ];
        for &(name, value) in non_negative.iter() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }
        if self.size_min > self.size_max {
            return Err(ConfigError::InvertedSizeRange {
                min: self.size_min,
                max: self.size_max,
            });
        }
        Ok(())
    }
}
