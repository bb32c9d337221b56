/// The element a particle field is mounted into.
pub trait Container {
    /// Rendered size in logical pixels.
    fn css_size(&self) -> (f64, f64);

    /// Physical pixels per logical pixel.
    fn device_pixel_ratio(&self) -> f64;

    /// Logical width of the viewport, used to pick the point count.
    fn viewport_width(&self) -> f64;
}
