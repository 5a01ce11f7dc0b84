// Plain particle record plus the free functions that spawn and advance it.
// Particles are stored contiguously in the field and never shared.

use rand::Rng;
use vecmath::Vector2;

use crate::config::AnimatorConfig;

// Surface dimensions the particles bounce inside of
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(width: u32, height: u32) -> Bounds {
        Bounds { width, height }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub size: f64,
    pub opacity: f64,
    pub pulse_phase: f64,
    pub pulse_speed: f64,
}

impl Particle {
    pub fn new(pos: Vector2<f64>, vel: Vector2<f64>, size: f64, pulse_speed: f64) -> Particle {
        Particle {
            pos,
            vel,
            size,
            opacity: 0.0,
            pulse_phase: 0.0,
            pulse_speed,
        }
    }
}

/// Creates a particle at a random spot inside `bounds` with randomized drift,
/// radius, starting opacity and pulse.
pub fn spawn<R: Rng>(rng: &mut R, bounds: Bounds, config: &AnimatorConfig) -> Particle {
    let pos = [
        rng.gen::<f64>() * bounds.width as f64,
        rng.gen::<f64>() * bounds.height as f64,
    ];
    let vel = [
        (rng.gen::<f64>() - 0.5) * config.max_speed,
        (rng.gen::<f64>() - 0.5) * config.max_speed,
    ];
    Particle {
        pos,
        vel,
        size: rng.gen::<f64>() * config.size_spread + config.size_min,
        opacity: rng.gen::<f64>() * config.opacity_spread + config.opacity_min,
        pulse_speed: rng.gen::<f64>() * config.pulse_speed_spread + config.pulse_speed_min,
        pulse_phase: rng.gen::<f64>() * std::f64::consts::PI * 2.0,
    }
}

/// Opacity for a given pulse phase. Not clamped: the result dips below zero
/// for part of each cycle with the default base and amplitude.
pub fn pulse_opacity(phase: f64, config: &AnimatorConfig) -> f64 {
    config.opacity_base + phase.sin() * config.opacity_amplitude
}

/// Moves the particle one frame, reflecting its velocity when the new
/// position leaves `bounds`, then advances its pulse.
pub fn advance(particle: &mut Particle, bounds: Bounds, config: &AnimatorConfig) {
    particle.pos = vecmath::vec2_add(particle.pos, particle.vel);

    let (width, height) = (bounds.width as f64, bounds.height as f64);
    if particle.pos[0] < 0.0 || particle.pos[0] > width {
        particle.vel[0] = -particle.vel[0];
    }
    if particle.pos[1] < 0.0 || particle.pos[1] > height {
        particle.vel[1] = -particle.vel[1];
    }

    particle.pulse_phase += particle.pulse_speed;
    particle.opacity = pulse_opacity(particle.pulse_phase, config);
}
