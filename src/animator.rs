//! Host-independent animation state machine.
//!
//! `Animator` owns the particle field, the bound surface and the RNG. It
//! knows nothing about frame scheduling or event listeners; the browser
//! driver in [`crate::web`] calls into it from its callbacks.
//!
//! Two states: `Idle` (no surface) and `Running` (surface bound). `tick`
//! reports whether the caller should schedule another frame.

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::AnimatorConfig;
use crate::error::AnimatorError;
use crate::field::ParticleField;
use crate::particle::Bounds;
use crate::render;
use crate::surface::Surface;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Idle,
    Running,
}

/// Inner size of the browser window.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Viewport {
        Viewport { width, height }
    }

    /// Surface size left once the header strip is taken off the top.
    pub fn surface_bounds(&self, header_offset: f64) -> Bounds {
        Bounds::new(
            to_dimension(self.width),
            to_dimension(self.height - header_offset),
        )
    }
}

fn to_dimension(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

pub struct Animator<S> {
    config: AnimatorConfig,
    field: ParticleField,
    surface: Option<S>,
    rng: StdRng,
    frames: u64,
}

impl<S: Surface> Animator<S> {
    pub fn new(config: AnimatorConfig) -> Animator<S> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Animator {
            config,
            field: ParticleField::new(),
            surface: None,
            rng,
            frames: 0,
        }
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn lifecycle(&self) -> Lifecycle {
        if self.surface.is_some() {
            Lifecycle::Running
        } else {
            Lifecycle::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle() == Lifecycle::Running
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Binds `surface`, sizes it to the viewport and seeds a fresh field.
    /// A missing surface leaves the animator idle. Calling this while running
    /// shuts the previous run down first.
    pub fn initialize(&mut self, surface: Option<S>, viewport: Viewport) -> Lifecycle {
        if self.is_running() {
            self.shutdown();
        }
        let mut surface = match surface {
            Some(surface) => surface,
            None => {
                debug!("initialize without a surface, staying idle");
                return Lifecycle::Idle;
            }
        };

        let bounds = viewport.surface_bounds(self.config.header_offset);
        surface.resize(bounds);
        self.field.regenerate(bounds, &self.config, &mut self.rng);
        self.surface = Some(surface);
        self.frames = 0;
        debug!(
            "particle field running at {}x{} with {} particles",
            bounds.width,
            bounds.height,
            self.field.len()
        );
        Lifecycle::Running
    }

    /// Resizes the surface and replaces the whole field. Ignored while idle.
    pub fn on_resize(&mut self, viewport: Viewport) {
        let surface = match self.surface.as_mut() {
            Some(surface) => surface,
            None => return,
        };
        let bounds = viewport.surface_bounds(self.config.header_offset);
        surface.resize(bounds);
        self.field.regenerate(bounds, &self.config, &mut self.rng);
        debug!(
            "resized to {}x{}, regenerated {} particles",
            bounds.width,
            bounds.height,
            self.field.len()
        );
    }

    /// Advances every particle and repaints. Returns `Ok(false)` when idle,
    /// meaning no further frame should be scheduled.
    pub fn tick(&mut self) -> Result<bool, AnimatorError> {
        let surface = match self.surface.as_mut() {
            Some(surface) => surface,
            None => return Ok(false),
        };
        self.field.advance(&self.config);
        self.frames += 1;
        render::render_field(&self.field, surface, &self.config)?;
        Ok(true)
    }

    /// Releases the surface and drops the field. Returns the surface if the
    /// animator was running; a second call returns `None`.
    pub fn shutdown(&mut self) -> Option<S> {
        let surface = self.surface.take()?;
        self.field.clear();
        debug!("particle field stopped after {} frames", self.frames);
        Some(surface)
    }
}
