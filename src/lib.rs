mod utils;

pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod logging;
pub mod particle;
pub mod random;
pub mod schedule;
pub mod surface;
pub mod web;

#[cfg(test)]
mod testing;

use wasm_bindgen::prelude::*;

pub use crate::color::Color;
pub use crate::config::FieldConfig;
pub use crate::error::{ConfigError, FieldError};
pub use crate::field::{FieldState, FieldStats, ParticleField, TickOutcome};
pub use crate::particle::Particle;
pub use crate::random::{RandomSource, RngSource};
pub use crate::schedule::{CallbackHandle, Scheduler};
pub use crate::surface::Surface;
pub use crate::web::{attach, ParticleHandle};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    logging::init(log::LevelFilter::Info);
}

#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    log::set_max_level(logging::parse_level(level));
}
