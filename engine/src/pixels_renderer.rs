use crate::graphics::{CpuRenderer, Renderer2d};
use crate::surface::SurfaceSize;

use pixels::Pixels;

/// Windowed presenter built on `pixels`.
///
/// The frame buffer keeps a fixed logical size; `pixels` scales it onto the window surface,
/// so game code always draws in buffer coordinates.
pub struct PixelsRenderer2d {
    pixels: Pixels,
    size: SurfaceSize,
}

impl PixelsRenderer2d {
    pub fn new(pixels: Pixels, size: SurfaceSize) -> Self {
        Self { pixels, size }
    }

    /// Resizes the window surface only; the logical buffer never changes.
    pub fn resize_surface(&mut self, width: u32, height: u32) -> Result<(), pixels::TextureError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(width, height)
    }

    /// Maps a physical window position to buffer coordinates, or `None` outside the buffer.
    pub fn window_pos_to_buffer(&self, x: f64, y: f64) -> Option<(u32, u32)> {
        self.pixels
            .window_pos_to_pixel((x as f32, y as f32))
            .ok()
            .map(|(px, py)| (px as u32, py as u32))
    }

    pub fn draw_frame<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut dyn Renderer2d) -> R,
    {
        let mut cpu = CpuRenderer::new(self.pixels.frame_mut(), self.size);
        cpu.begin_frame(self.size);
        f(&mut cpu)
    }

    pub fn present(&mut self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }
}
