//! The particle collection and the surface bounds it lives in.

use rand::Rng;
use vecmath::Vector2;

use crate::config::AnimatorConfig;
use crate::particle::{self, Bounds, Particle};

/// A line between two particles closer than the link distance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Link {
    pub from: Vector2<f64>,
    pub to: Vector2<f64>,
    pub alpha: f64,
}

/// Number of particles a surface of the given size holds: one per
/// `area_per_particle` square units, capped at `max_particles`.
pub fn particle_count(bounds: Bounds, config: &AnimatorConfig) -> usize {
    let raw = bounds.area() / config.area_per_particle;
    if raw >= config.max_particles as u64 {
        config.max_particles
    } else {
        raw as usize
    }
}

/// Alpha of the line joining two particles `distance` apart, or `None` when
/// they are too far apart to be linked.
pub fn link_alpha(distance: f64, config: &AnimatorConfig) -> Option<f64> {
    if distance < config.link_distance {
        Some((config.link_distance - distance) / config.link_distance * config.link_max_alpha)
    } else {
        None
    }
}

#[derive(Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Bounds,
}

impl ParticleField {
    pub fn new() -> ParticleField {
        ParticleField::default()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Throws away every particle and spawns a fresh batch sized for `bounds`.
    pub fn regenerate<R: Rng>(
        &mut self,
        bounds: Bounds,
        config: &AnimatorConfig,
        rng: &mut R,
    ) {
        let count = particle_count(bounds, config);
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(particle::spawn(rng, bounds, config));
        }
        self.particles = particles;
        self.bounds = bounds;
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.bounds = Bounds::default();
    }

    pub fn advance(&mut self, config: &AnimatorConfig) {
        let bounds = self.bounds;
        for p in &mut self.particles {
            particle::advance(p, bounds, config);
        }
    }

    /// Every unordered pair closer than the link distance. O(n²), which the
    /// density cap keeps small.
    pub fn links<'a>(&'a self, config: &'a AnimatorConfig) -> impl Iterator<Item = Link> + 'a {
        let particles = &self.particles;
        particles.iter().enumerate().flat_map(move |(i, a)| {
            particles[i + 1..].iter().filter_map(move |b| {
                let distance = vecmath::vec2_len(vecmath::vec2_sub(a.pos, b.pos));
                link_alpha(distance, config).map(|alpha| Link {
                    from: a.pos,
                    to: b.pos,
                    alpha,
                })
            })
        })
    }

    #[cfg(test)]
    pub(crate) fn from_particles(particles: Vec<Particle>, bounds: Bounds) -> ParticleField {
        ParticleField { particles, bounds }
    }
}
