// Single glowing dot: drifts at a constant velocity and shrinks each tick until the
// field culls it.

use crate::color::Color;
use crate::config::FieldConfig;
use crate::random::RandomSource;
use crate::surface::Surface;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub size: f64,
    pub color: Color,
}

impl Particle {
    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, size: f64, color: Color) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            size,
            color,
        }
    }

    // Draw order matters for reproducible tests: size, vel x, vel y, color
    pub fn create(x: f64, y: f64, rng: &mut dyn RandomSource, config: &FieldConfig) -> Particle {
        let size = rng.next_unit() * (config.size_max - config.size_min) + config.size_min;
        let vel_x = rng.next_unit() * 2.0 * config.max_speed - config.max_speed;
        let vel_y = rng.next_unit() * 2.0 * config.max_speed - config.max_speed;
        let color = if rng.next_unit() < 0.5 {
            config.palette[0]
        } else {
            config.palette[1]
        };
        Particle::new(x, y, vel_x, vel_y, size, color)
    }

    /// One tick of motion and decay. Size only shrinks while above `min_visible`;
    /// removal is left to the field.
    pub fn advance(&mut self, decay: f64, min_visible: f64) {
        self.pos = vecmath::vec2_add(self.pos, self.vel);
        if self.size > min_visible {
            self.size = (self.size - decay).max(0.0);
        }
    }

    pub fn is_visible(&self, min_visible: f64) -> bool {
        self.size > min_visible
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        if self.size <= 0.0 {
            return;
        }
        surface.set_fill_color(self.color);
        surface.fill_circle(self.pos[0], self.pos[1], self.size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DrawCall, RecordingSurface, ScriptedRandom};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn create_maps_draws_onto_config_ranges() {
        let mut rng = ScriptedRandom::new(vec![0.5, 0.0, 0.75, 0.9]);
        let p = Particle::create(10.0, 20.0, &mut rng, &FieldConfig::default());
        assert_eq!(p.pos, [10.0, 20.0]);
        assert!(approx(p.size, 2.0));
        assert!(approx(p.vel[0], -0.5));
        assert!(approx(p.vel[1], 0.25));
        assert_eq!(p.color, Color::NEON_CYAN);
    }

    #[test]
    fn create_picks_first_color_below_half() {
        let mut rng = ScriptedRandom::new(vec![0.1, 0.5, 0.5, 0.49]);
        let p = Particle::create(0.0, 0.0, &mut rng, &FieldConfig::default());
        assert_eq!(p.color, Color::NEON_MAGENTA);
        assert!(approx(p.vel[0], 0.0));
    }

    #[test]
    fn advance_moves_and_shrinks() {
        let mut p = Particle::new(1.0, 1.0, 0.5, -0.25, 1.0, Color::NEON_CYAN);
        p.advance(0.05, 0.2);
        assert_eq!(p.pos, [1.5, 0.75]);
        assert!(approx(p.size, 0.95));
    }

    #[test]
    fn advance_holds_size_at_or_below_threshold() {
        let mut p = Particle::new(0.0, 0.0, 1.0, 0.0, 0.2, Color::NEON_CYAN);
        p.advance(0.05, 0.2);
        assert_eq!(p.size, 0.2);
        assert_eq!(p.pos, [1.0, 0.0]);
    }

    #[test]
    fn size_never_increases_and_never_goes_negative() {
        let mut p = Particle::new(0.0, 0.0, 0.0, 0.0, 0.3, Color::NEON_CYAN);
        let mut last = p.size;
        for _ in 0..20 {
            p.advance(0.25, 0.2);
            assert!(p.size <= last);
            assert!(p.size >= 0.0);
            last = p.size;
        }
        assert!(!p.is_visible(0.2));
    }

    #[test]
    fn render_draws_circle_in_particle_color() {
        let mut surface = RecordingSurface::new(100, 100);
        let p = Particle::new(3.0, 4.0, 0.0, 0.0, 1.5, Color::NEON_MAGENTA);
        p.render(&mut surface);
        assert_eq!(
            surface.calls,
            vec![
                DrawCall::Fill(Color::NEON_MAGENTA),
                DrawCall::Circle { x: 3.0, y: 4.0, radius: 1.5 },
            ]
        );
    }

    #[test]
    fn render_skips_zero_size() {
        let mut surface = RecordingSurface::new(100, 100);
        Particle::new(3.0, 4.0, 0.0, 0.0, 0.0, Color::NEON_MAGENTA).render(&mut surface);
        assert!(surface.calls.is_empty());
    }
}
