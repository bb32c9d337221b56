/// Cairo-based renderer implementation.

use crate::core::types::{Color, Vec2};
use crate::platform::renderer::Renderer;
use cairo::{Context, Operator};
use std::f64::consts::PI;

pub struct RendererCairo {
    cr: Context,
    // Painted by clear_rect; X windows have no alpha channel to clear to
    backdrop: Color,
}

impl RendererCairo {
    pub fn new(cr: Context, backdrop: Color) -> Self {
        Self { cr, backdrop }
    }

    /// Update the Cairo context (e.g., after window resize).
    pub fn set_context(&mut self, cr: Context) {
        self.cr = cr;
    }

    fn set_color(&self, color: Color) {
        self.cr.set_source_rgba(color.r, color.g, color.b, color.a);
    }
}

impl Renderer for RendererCairo {
    fn begin_frame(&mut self, _width: i32, _height: i32) {
        self.cr.save().ok();
    }

    fn end_frame(&mut self) {
        self.cr.restore().ok();
    }

    fn clear_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        self.cr.save().ok();
        self.cr.set_operator(Operator::Source);
        self.set_color(self.backdrop);
        self.cr.rectangle(x, y, w, h);
        self.cr.fill().ok();
        self.cr.restore().ok();
    }

    fn draw_text(&self, x: f64, y: f64, text: &str, size: f64, color: Color) {
        self.set_color(color);
        self.cr
            .select_font_face("monospace", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        self.cr.set_font_size(size);
        self.cr.move_to(x, y + size);
        self.cr.show_text(text).ok();
    }

    fn fill_circle(&self, cx: f64, cy: f64, radius: f64, color: Color) {
        self.set_color(color);
        self.cr.new_path();
        self.cr.arc(cx, cy, radius, 0.0, 2.0 * PI);
        self.cr.fill().ok();
    }

    fn stroke_line(&self, from: Vec2, to: Vec2, color: Color, line_width: f64) {
        self.set_color(color);
        self.cr.set_line_width(line_width);
        self.cr.new_path();
        self.cr.move_to(from.x, from.y);
        self.cr.line_to(to.x, to.y);
        self.cr.stroke().ok();
    }

    fn push_transform(&self, offset: Vec2, scale: f64) {
        self.cr.save().ok();
        self.cr.translate(offset.x, offset.y);
        self.cr.scale(scale, scale);
    }

    fn pop_transform(&self) {
        self.cr.restore().ok();
    }
}
