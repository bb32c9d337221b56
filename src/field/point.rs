/// A drifting point and the per-point math of the network field.

use crate::core::config::FieldConfig;
use crate::core::types::{SurfaceSize, Vec2};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
}

impl Point {
    /// Sample a point anywhere on the surface with a random drift and size.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, surface: SurfaceSize, config: &FieldConfig) -> Self {
        let v = config.velocity_max;
        Self {
            x: rng.gen_range(0.0..=surface.width),
            y: rng.gen_range(0.0..=surface.height),
            vx: rng.gen_range(-v..=v),
            vy: rng.gen_range(-v..=v),
            radius: rng.gen_range(config.radius_min..=config.radius_max),
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Advance one frame and reflect off the surface edges.
    ///
    /// The bounds test runs on every step, not only on the crossing frame, so a
    /// point that is still outside after reversing gets flipped again.
    pub fn step(&mut self, surface: SurfaceSize) {
        self.x += self.vx;
        self.y += self.vy;

        if self.x < 0.0 || self.x > surface.width {
            self.vx = -self.vx;
        }
        if self.y < 0.0 || self.y > surface.height {
            self.vy = -self.vy;
        }
    }
}

/// Number of points for a viewport of the given logical width.
pub fn point_count(viewport_width: f64, config: &FieldConfig) -> usize {
    if viewport_width < config.mobile_breakpoint {
        config.count_mobile
    } else {
        config.count_desktop
    }
}

pub fn generate_points<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    surface: SurfaceSize,
    config: &FieldConfig,
) -> Vec<Point> {
    (0..count)
        .map(|_| Point::random(rng, surface, config))
        .collect()
}

/// Stroke alpha for a link of the given length, or None when too far apart.
pub fn link_alpha(distance: f64, config: &FieldConfig) -> Option<f64> {
    if distance < config.link_distance {
        Some((1.0 - distance / config.link_distance) * config.link_alpha)
    } else {
        None
    }
}
