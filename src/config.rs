//! Tunables for the particle field.
//!
//! Defaults reproduce the landing page hero animation. A host can override
//! any subset of them by passing a JSON object to `HeroAnimator.withConfig`.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::AnimatorError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Height reserved above the canvas for the page header.
    pub header_offset: f64,
    /// Surface area (in square units) that earns one particle.
    pub area_per_particle: u64,
    /// Density cap.
    pub max_particles: usize,
    /// Pairs closer than this are joined by a line.
    pub link_distance: f64,
    /// Line alpha for two coincident particles; fades linearly to 0 at `link_distance`.
    pub link_max_alpha: f64,
    pub link_width: f64,
    /// RRGGBBAA.
    pub color: u32,
    /// Velocity components are drawn from [-max_speed / 2, max_speed / 2).
    pub max_speed: f64,
    pub size_min: f64,
    pub size_spread: f64,
    pub opacity_min: f64,
    pub opacity_spread: f64,
    pub pulse_speed_min: f64,
    pub pulse_speed_spread: f64,
    pub opacity_base: f64,
    pub opacity_amplitude: f64,
    /// Clamp alpha to [0, 1] before it reaches the drawing backend.
    pub clamp_alpha: bool,
    /// Fixed RNG seed; fields are seeded from entropy when absent.
    pub seed: Option<u64>,
    /// Wrap every frame in `console.time` / `console.timeEnd`.
    pub profile_frames: bool,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        AnimatorConfig {
            header_offset: 60.0,
            area_per_particle: 15_000,
            max_particles: 100,
            link_distance: 100.0,
            link_max_alpha: 0.1,
            link_width: 0.5,
            color: 0x60a5_faff,
            max_speed: 0.5,
            size_min: 0.5,
            size_spread: 2.0,
            opacity_min: 0.2,
            opacity_spread: 0.5,
            pulse_speed_min: 0.01,
            pulse_speed_spread: 0.02,
            opacity_base: 0.2,
            opacity_amplitude: 0.3,
            clamp_alpha: true,
            seed: None,
            profile_frames: false,
        }
    }
}

impl AnimatorConfig {
    pub fn from_json(json: &str) -> Result<Self, AnimatorError> {
        let config: AnimatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn color(&self) -> Color {
        Color::from_u32(self.color)
    }

    pub fn validate(&self) -> Result<(), AnimatorError> {
        let floats = [
            ("header_offset", self.header_offset),
            ("link_distance", self.link_distance),
            ("link_max_alpha", self.link_max_alpha),
            ("link_width", self.link_width),
            ("max_speed", self.max_speed),
            ("size_min", self.size_min),
            ("size_spread", self.size_spread),
            ("opacity_min", self.opacity_min),
            ("opacity_spread", self.opacity_spread),
            ("pulse_speed_min", self.pulse_speed_min),
            ("pulse_speed_spread", self.pulse_speed_spread),
            ("opacity_base", self.opacity_base),
            ("opacity_amplitude", self.opacity_amplitude),
        ];
        for &(field, value) in floats.iter() {
            if !value.is_finite() {
                return Err(AnimatorError::invalid(field, format!("{} is not finite", value)));
            }
        }

        if self.area_per_particle == 0 {
            return Err(AnimatorError::invalid("area_per_particle", "must be non-zero"));
        }
        if self.link_distance <= 0.0 {
            return Err(AnimatorError::invalid("link_distance", "must be positive"));
        }
        if self.size_min <= 0.0 {
            return Err(AnimatorError::invalid("size_min", "particle radius must be positive"));
        }

        let non_negative = [
            ("header_offset", self.header_offset),
            ("link_max_alpha", self.link_max_alpha),
            ("link_width", self.link_width),
            ("max_speed", self.max_speed),
            ("size_spread", self.size_spread),
            ("opacity_spread", self.opacity_spread),
            ("pulse_speed_min", self.pulse_speed_min),
            ("pulse_speed_spread", self.pulse_speed_spread),
        ];
        for &(field, value) in non_negative.iter() {
            if value < 0.0 {
                return Err(AnimatorError::invalid(field, "must not be negative"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        AnimatorConfig::default().validate().unwrap();
    }

    #[test]
    fn empty_object_yields_defaults() {
        let config = AnimatorConfig::from_json("{}").unwrap();
        assert_eq!(config, AnimatorConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = AnimatorConfig::from_json(r#"{"max_particles": 40, "seed": 7}"#).unwrap();
        assert_eq!(config.max_particles, 40);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.area_per_particle, 15_000);
        assert_eq!(config.link_distance, 100.0);
    }

    #[test]
    fn zero_area_is_rejected() {
        let err = AnimatorConfig::from_json(r#"{"area_per_particle": 0}"#).unwrap_err();
        match err {
            AnimatorError::InvalidConfig { field, .. } => assert_eq!(field, "area_per_particle"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn negative_spread_is_rejected() {
        let config = AnimatorConfig {
            size_spread: -1.0,
            ..AnimatorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_finite_value_is_rejected() {
        let config = AnimatorConfig {
            max_speed: f64::NAN,
            ..AnimatorConfig::default()
        };
        match config.validate() {
            Err(AnimatorError::InvalidConfig { field, .. }) => assert_eq!(field, "max_speed"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = AnimatorConfig::from_json("{ max_particles").unwrap_err();
        assert!(matches!(err, AnimatorError::ConfigParse(_)));
    }

    #[test]
    fn default_color_is_hero_blue() {
        let c = AnimatorConfig::default().color();
        assert_eq!((c.r, c.g, c.b, c.a), (96, 165, 250, 255));
    }
}
