mod utils;

pub mod animator;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod logging;
pub mod particle;
pub mod render;
pub mod surface;
pub mod web;

use log::LevelFilter;
use wasm_bindgen::prelude::*;
use web_sys::console;

pub use animator::{Animator, Lifecycle, Viewport};
pub use config::AnimatorConfig;
pub use error::AnimatorError;
pub use field::ParticleField;
pub use particle::{Bounds, Particle};
pub use surface::{CanvasSurface, Surface};
pub use web::HeroAnimator;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    logging::init(LevelFilter::Info);
}

#[wasm_bindgen(js_name = setVerboseLogging)]
pub fn set_verbose_logging(verbose: bool) {
    logging::init(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
}

// Scoped console.time / console.timeEnd pair
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}
