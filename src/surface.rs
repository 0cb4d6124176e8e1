use crate::color::Color;

/// A 2D drawing target sized to a host container.
///
/// These are the only primitives the particle field needs from its host, which lets
/// the engine run against a recording surface in tests and a canvas in the browser.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Current dimensions of the container the surface is mounted in.
    fn container_size(&self) -> (u32, u32);

    fn set_size(&mut self, width: u32, height: u32);

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn set_fill_color(&mut self, color: Color);

    /// Callers guarantee `radius > 0`.
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64);

    fn clear(&mut self) {
        let (w, h) = (self.width() as f64, self.height() as f64);
        self.clear_rect(0.0, 0.0, w, h);
    }

    fn fit_to_container(&mut self) {
        let (width, height) = self.container_size();
        self.set_size(width, height);
    }
}
