/// Network particle field: drifting points joined by fading links.

use crate::core::config::{self, FieldConfig};
use crate::core::debounce::Debouncer;
use crate::core::types::{Color, SurfaceSize, Vec2};
use crate::field::container::Container;
use crate::field::point::{generate_points, link_alpha, point_count, Point};
use crate::platform::renderer::Renderer;
use rand::rngs::StdRng;
use rand::Rng;
use std::time::{Duration, Instant};

pub struct ParticleField<R: Rng = StdRng> {
    config: FieldConfig,
    points: Vec<Point>,

    // Physical pixel bounds and the logical-to-physical scale
    surface: SurfaceSize,
    scale: f64,

    visible: bool,
    resize: Debouncer,
    rng: R,
}

impl<R: Rng> ParticleField<R> {
    /// Set up a field inside `container`. Returns None when there is nothing to
    /// mount into, in which case the feature stays inert.
    pub fn mount<C: Container>(container: Option<&C>, config: FieldConfig, rng: R) -> Option<Self> {
        let Some(container) = container else {
            log::debug!("No container for particle field; skipping");
            return None;
        };

        let (surface, scale) = measure(container);
        if surface.is_empty() {
            log::debug!("Particle field container has no area; skipping");
            return None;
        }

        let resize = Debouncer::new(Duration::from_millis(config.resize_debounce_ms));
        let mut field = Self {
            config,
            points: Vec::new(),
            surface,
            scale,
            visible: true,
            resize,
            rng,
        };
        field.regenerate(container.viewport_width());

        log::info!(
            "Particle field mounted: {}x{} px @{}x, {} points",
            surface.width,
            surface.height,
            scale,
            field.points.len()
        );
        Some(field)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Viewport signal: false only while the container is entirely off screen.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            log::debug!("Particle field visible: {}", visible);
        }
        self.visible = visible;
    }

    /// Record a container resize. The work happens in `poll_resize` once the
    /// burst has settled.
    pub fn notify_resize(&mut self, now: Instant) {
        self.resize.trigger(now);
    }

    /// Re-measure the surface and rebuild every point if the resize debounce has
    /// fired. Returns whether it did.
    pub fn poll_resize<C: Container>(&mut self, container: &C, now: Instant) -> bool {
        if !self.resize.poll(now) {
            return false;
        }

        let (surface, scale) = measure(container);
        self.surface = surface;
        self.scale = scale;
        self.regenerate(container.viewport_width());

        log::debug!(
            "Particle field resized to {}x{} px, {} points",
            surface.width,
            surface.height,
            self.points.len()
        );
        true
    }

    /// Run one animation frame: advance, clear, then draw points and links.
    /// Does nothing while hidden, so time stands still off screen.
    pub fn frame(&mut self, renderer: &dyn Renderer) {
        if !self.visible {
            return;
        }

        for point in &mut self.points {
            point.step(self.surface);
        }

        renderer.push_transform(Vec2::default(), self.scale);
        renderer.clear_rect(0.0, 0.0, self.surface.width, self.surface.height);

        let point_color = Color::from_hex(config::POINT_COLOR, 1.0);
        for point in &self.points {
            renderer.fill_circle(point.x, point.y, point.radius, point_color);
        }

        let link_color = Color::from_hex(config::LINK_COLOR, 1.0);
        for (i, j, alpha) in self.links() {
            renderer.stroke_line(
                self.points[i].position(),
                self.points[j].position(),
                link_color.with_alpha(alpha),
                config::LINK_WIDTH,
            );
        }

        renderer.pop_transform();
    }

    /// Number of point pairs currently close enough to be linked.
    pub fn link_count(&self) -> usize {
        self.links().count()
    }

    /// Every unordered pair (i < j) under the link distance, with its alpha.
    fn links(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let points = &self.points;
        (0..points.len()).flat_map(move |i| {
            (i + 1..points.len()).filter_map(move |j| {
                let distance = points[i].position().distance(points[j].position());
                link_alpha(distance, &self.config).map(|alpha| (i, j, alpha))
            })
        })
    }

    fn regenerate(&mut self, viewport_width: f64) {
        let count = point_count(viewport_width, &self.config);
        self.points = generate_points(&mut self.rng, count, self.surface, &self.config);
    }
}

/// Surface bounds in whole physical pixels, plus the ratio used to get there.
fn measure<C: Container>(container: &C) -> (SurfaceSize, f64) {
    let ratio = container.device_pixel_ratio();
    let scale = if ratio > 0.0 { ratio } else { 1.0 };
    let (w, h) = container.css_size();
    let surface = SurfaceSize::new((w * scale).floor().max(0.0), (h * scale).floor().max(0.0));
    (surface, scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::renderer::recording::{DrawCall, RecordingRenderer};
    use rand::SeedableRng;

    struct FakeContainer {
        width: f64,
        height: f64,
        ratio: f64,
    }

    impl Container for FakeContainer {
        fn css_size(&self) -> (f64, f64) {
            (self.width, self.height)
        }

        fn device_pixel_ratio(&self) -> f64 {
            self.ratio
        }

        fn viewport_width(&self) -> f64 {
            self.width
        }
    }

    fn container(width: f64, height: f64) -> FakeContainer {
        FakeContainer {
            width,
            height,
            ratio: 1.0,
        }
    }

    fn mount(c: &FakeContainer) -> ParticleField {
        ParticleField::mount(Some(c), FieldConfig::default(), StdRng::seed_from_u64(42)).unwrap()
    }

    fn still(x: f64, y: f64) -> Point {
        Point {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            radius: 2.0,
        }
    }

    fn lines(calls: &[DrawCall]) -> Vec<&DrawCall> {
        calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Line { .. }))
            .collect()
    }

    #[test]
    fn test_missing_container_is_inert() {
        let field = ParticleField::mount(
            None::<&FakeContainer>,
            FieldConfig::default(),
            StdRng::seed_from_u64(1),
        );
        assert!(field.is_none());
    }

    #[test]
    fn test_zero_area_container_is_inert() {
        let c = container(0.0, 400.0);
        let field = ParticleField::mount(Some(&c), FieldConfig::default(), StdRng::seed_from_u64(1));
        assert!(field.is_none());
    }

    #[test]
    fn test_surface_scaled_by_pixel_ratio() {
        let c = FakeContainer {
            width: 1024.5,
            height: 600.0,
            ratio: 2.0,
        };
        let field = mount(&c);
        assert_eq!(field.surface(), SurfaceSize::new(2049.0, 1200.0));
        assert_eq!(field.scale(), 2.0);
        assert!(field.points().iter().all(|p| p.x <= 2049.0 && p.y <= 1200.0));
    }

    #[test]
    fn test_invalid_pixel_ratio_falls_back_to_one() {
        let c = FakeContainer {
            width: 800.0,
            height: 600.0,
            ratio: 0.0,
        };
        let field = mount(&c);
        assert_eq!(field.scale(), 1.0);
        assert_eq!(field.surface(), SurfaceSize::new(800.0, 600.0));
    }

    #[test]
    fn test_point_count_follows_viewport() {
        assert_eq!(mount(&container(1024.0, 600.0)).points().len(), 50);
        assert_eq!(mount(&container(500.0, 600.0)).points().len(), 25);
    }

    #[test]
    fn test_resize_regenerates_after_debounce() {
        let mut c = container(1024.0, 600.0);
        let mut field = mount(&c);
        assert_eq!(field.points().len(), 50);
        let before = field.points().to_vec();

        let t0 = Instant::now();
        c.width = 500.0;
        c.height = 300.0;
        field.notify_resize(t0);
        field.notify_resize(t0 + Duration::from_millis(100));

        assert!(!field.poll_resize(&c, t0 + Duration::from_millis(300)));
        assert_eq!(field.points().len(), 50);

        assert!(field.poll_resize(&c, t0 + Duration::from_millis(351)));
        assert_eq!(field.points().len(), 25);
        assert_eq!(field.surface(), SurfaceSize::new(500.0, 300.0));
        assert!(field
            .points()
            .iter()
            .all(|p| p.x >= 0.0 && p.x <= 500.0 && p.y >= 0.0 && p.y <= 300.0));
        assert_ne!(&before[..25], field.points());

        // Already handled
        assert!(!field.poll_resize(&c, t0 + Duration::from_millis(1000)));
    }

    #[test]
    fn test_hidden_field_does_not_advance_or_draw() {
        let c = container(1024.0, 600.0);
        let mut field = mount(&c);
        let renderer = RecordingRenderer::new();

        field.set_visible(false);
        let before = field.points().to_vec();
        for _ in 0..10 {
            field.frame(&renderer);
        }
        assert_eq!(field.points(), &before[..]);
        assert!(renderer.take().is_empty());

        field.set_visible(true);
        field.frame(&renderer);
        assert_ne!(field.points(), &before[..]);
        assert!(!renderer.take().is_empty());
    }

    #[test]
    fn test_frame_clears_then_draws_points_then_links() {
        let c = FakeContainer {
            width: 400.0,
            height: 400.0,
            ratio: 2.0,
        };
        let mut field = mount(&c);
        field.points = vec![still(10.0, 10.0), still(40.0, 50.0), still(500.0, 500.0)];

        let renderer = RecordingRenderer::new();
        field.frame(&renderer);
        let calls = renderer.take();

        assert_eq!(calls[0], DrawCall::PushTransform { scale: 2.0 });
        assert_eq!(calls[1], DrawCall::Clear { w: 800.0, h: 800.0 });
        assert!(matches!(calls[2], DrawCall::Circle { cx, cy, .. } if cx == 10.0 && cy == 10.0));
        assert!(matches!(calls[3], DrawCall::Circle { .. }));
        assert!(matches!(calls[4], DrawCall::Circle { cx, .. } if cx == 500.0));
        assert_eq!(*calls.last().unwrap(), DrawCall::PopTransform);

        // Only the pair 50px apart is linked, at (1 - 0.5) * 0.5
        let links = lines(&calls);
        assert_eq!(links.len(), 1);
        match links[0] {
            DrawCall::Line { from, to, color } => {
                assert_eq!(*from, Vec2::new(10.0, 10.0));
                assert_eq!(*to, Vec2::new(40.0, 50.0));
                assert!((color.a - 0.25).abs() < 1e-12);
            }
            _ => unreachable!(),
        }
        assert_eq!(field.link_count(), 1);
    }

    #[test]
    fn test_no_link_at_threshold() {
        let c = container(1024.0, 600.0);
        let mut field = mount(&c);
        field.points = vec![still(100.0, 100.0), still(200.0, 100.0), still(100.0, 199.0)];

        let renderer = RecordingRenderer::new();
        field.frame(&renderer);
        let calls = renderer.take();

        // 100 apart: none; 99 apart: one; diagonal ~140: none
        assert_eq!(lines(&calls).len(), 1);
    }

    #[test]
    fn test_all_pairs_checked_once() {
        let c = container(1024.0, 600.0);
        let mut field = mount(&c);
        field.points = (0..5).map(|i| still(100.0 + i as f64, 100.0)).collect();
        assert_eq!(field.link_count(), 10);
    }

    #[test]
    fn test_out_of_bounds_point_flips_during_frame() {
        let c = container(1024.0, 600.0);
        let mut field = mount(&c);
        field.points = vec![Point {
            x: 1023.9,
            y: 300.0,
            vx: 0.2,
            vy: 0.0,
            radius: 1.0,
        }];

        let renderer = RecordingRenderer::new();
        field.frame(&renderer);
        assert!(field.points()[0].vx < 0.0);
    }
}
