/// Optional text overlay showing the field's point count.

pub mod counter;

use crate::core::config;
use crate::core::types::Color;
use crate::platform::renderer::Renderer;
use counter::Counter;
use std::time::Instant;

pub struct Hud {
    points: Counter,
}

impl Hud {
    pub fn new(point_count: usize, now: Instant) -> Self {
        let mut hud = Self {
            points: Counter::new("0", "", ""),
        };
        hud.restart(point_count, now);
        hud
    }

    /// Count up to a new total, e.g. after the points were regenerated.
    pub fn restart(&mut self, point_count: usize, now: Instant) {
        self.points = Counter::new(&point_count.to_string(), "", " nodes");
        self.points.start(now);
    }

    pub fn render(&self, renderer: &dyn Renderer, links: usize, now: Instant) {
        let text = format!("{}  {} links", self.points.text(now), links);
        renderer.draw_text(
            config::HUD_MARGIN,
            config::HUD_MARGIN,
            &text,
            config::HUD_TEXT_SIZE,
            Color::from_hex(config::TEXT_PRIMARY, 0.8),
        );
    }
}
