// Paints a particle field onto a surface: clear, one filled circle per
// particle, then the links between nearby particles.

use crate::config::AnimatorConfig;
use crate::error::AnimatorError;
use crate::field::ParticleField;
use crate::surface::Surface;

fn paint_alpha(alpha: f64, config: &AnimatorConfig) -> f64 {
    if config.clamp_alpha {
        alpha.max(0.0).min(1.0)
    } else {
        alpha
    }
}

pub fn render_field<S: Surface + ?Sized>(
    field: &ParticleField,
    surface: &mut S,
    config: &AnimatorConfig,
) -> Result<(), AnimatorError> {
    let color = config.color();
    surface.clear(field.bounds());

    for p in field.particles() {
        surface.fill_circle(p.pos, p.size, color, paint_alpha(p.opacity, config))?;
    }

    for link in field.links(config) {
        surface.stroke_line(
            link.from,
            link.to,
            config.link_width,
            color,
            paint_alpha(link.alpha, config),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::{Bounds, Particle};
    use crate::surface::recording::{DrawOp, RecordingSurface};

    fn glowing(x: f64, y: f64, opacity: f64) -> Particle {
        let mut p = Particle::new([x, y], [0.0, 0.0], 1.5, 0.01);
        p.opacity = opacity;
        p
    }

    #[test]
    fn clears_before_drawing() {
        let config = AnimatorConfig::default();
        let bounds = Bounds::new(400, 300);
        let field = ParticleField::from_particles(vec![glowing(10.0, 10.0, 0.3)], bounds);
        let mut surface = RecordingSurface::default();
        render_field(&field, &mut surface, &config).unwrap();
        assert_eq!(surface.ops[0], DrawOp::Clear(bounds));
        assert_eq!(
            surface.ops[1],
            DrawOp::Circle {
                center: [10.0, 10.0],
                radius: 1.5,
                alpha: 0.3
            }
        );
    }

    #[test]
    fn circles_precede_links() {
        let config = AnimatorConfig::default();
        let field = ParticleField::from_particles(
            vec![glowing(10.0, 10.0, 0.3), glowing(20.0, 10.0, 0.4)],
            Bounds::new(400, 300),
        );
        let mut surface = RecordingSurface::default();
        render_field(&field, &mut surface, &config).unwrap();
        assert_eq!(surface.ops.len(), 4);
        assert!(matches!(surface.ops[1], DrawOp::Circle { .. }));
        assert!(matches!(surface.ops[2], DrawOp::Circle { .. }));
        assert_eq!(
            surface.ops[3],
            DrawOp::Line {
                from: [10.0, 10.0],
                to: [20.0, 10.0],
                width: 0.5,
                alpha: (100.0 - 10.0) / 100.0 * 0.1,
            }
        );
    }

    #[test]
    fn negative_opacity_is_clamped_when_painting() {
        let config = AnimatorConfig::default();
        let field =
            ParticleField::from_particles(vec![glowing(5.0, 5.0, -0.08)], Bounds::new(50, 50));
        let mut surface = RecordingSurface::default();
        render_field(&field, &mut surface, &config).unwrap();
        match surface.circles()[0] {
            DrawOp::Circle { alpha, .. } => assert_eq!(*alpha, 0.0),
            other => panic!("unexpected op {:?}", other),
        }
        // the stored opacity is left alone
        assert_eq!(field.particles()[0].opacity, -0.08);
    }

    #[test]
    fn clamping_can_be_disabled() {
        let config = AnimatorConfig {
            clamp_alpha: false,
            ..AnimatorConfig::default()
        };
        let field =
            ParticleField::from_particles(vec![glowing(5.0, 5.0, -0.08)], Bounds::new(50, 50));
        let mut surface = RecordingSurface::default();
        render_field(&field, &mut surface, &config).unwrap();
        match surface.circles()[0] {
            DrawOp::Circle { alpha, .. } => assert_eq!(*alpha, -0.08),
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn draw_failure_propagates() {
        let config = AnimatorConfig::default();
        let field =
            ParticleField::from_particles(vec![glowing(5.0, 5.0, 0.2)], Bounds::new(50, 50));
        let mut surface = RecordingSurface {
            fail_circles: true,
            ..RecordingSurface::default()
        };
        let err = render_field(&field, &mut surface, &config).unwrap_err();
        assert!(matches!(err, AnimatorError::Draw(_)));
        assert!(surface.lines().is_empty());
    }
}
