use crate::{surface::SurfaceSize, ui::Rect};

pub type Color = [u8; 4];

// A tiny block font (no external deps). Uppercase only; lowercase input is folded.
const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

fn glyph_advance_x(scale: u32) -> u32 {
    (GLYPH_W + 1) * scale.max(1)
}

fn line_advance_y(scale: u32) -> u32 {
    (GLYPH_H + 1) * scale.max(1)
}

/// Pixel width of the longest line of `text` at `scale`.
pub fn text_width(text: &str, scale: u32) -> u32 {
    let widest = text
        .split('\n')
        .map(|line| line.chars().count() as u32)
        .max()
        .unwrap_or(0);
    // The trailing glyph gap is not part of the visible extent.
    (widest * glyph_advance_x(scale)).saturating_sub(scale.max(1))
}

/// Pixel height of `text` at `scale`, counting every line.
pub fn text_height(text: &str, scale: u32) -> u32 {
    let lines = text.split('\n').count() as u32;
    (lines * line_advance_y(scale)).saturating_sub(scale.max(1))
}

/// A decoded RGBA8 image, ready to be blitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Sprite {
    /// Returns `None` when `rgba` does not hold exactly `width * height` pixels.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if rgba.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

/// Unified 2D rendering interface.
///
/// Game code only talks to this trait, so the same drawing code runs against the window's
/// frame buffer and against headless buffers in tests.
pub trait Renderer2d {
    fn begin_frame(&mut self, size: SurfaceSize);
    fn size(&self) -> SurfaceSize;

    /// Opaque fill.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Alpha-blended rect over existing content (alpha is applied to `color`'s RGB).
    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8);

    fn rect_outline(&mut self, rect: Rect, color: Color);
    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32);

    /// Draws `sprite` with its top-left corner at (`x`, `y`), blending by the sprite's alpha.
    fn draw_sprite(&mut self, x: u32, y: u32, sprite: &Sprite);

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }
}

/// CPU renderer that draws into an RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    fn frame_is_valid(&self) -> bool {
        let expected_len = self.size.rgba_len();
        expected_len != 0 && self.frame.len() >= expected_len
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn begin_frame(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let width = self.size.width;
        let height = self.size.height;

        let max_x = rect.x.saturating_add(rect.w).min(width);
        let max_y = rect.y.saturating_add(rect.h).min(height);
        if rect.x >= max_x || rect.y >= max_y || !self.frame_is_valid() {
            return;
        }

        let row_bytes = (max_x - rect.x) as usize * 4;
        let stride = width as usize * 4;
        let mut row_start = rect.y as usize * stride + rect.x as usize * 4;

        for _ in rect.y..max_y {
            let row = &mut self.frame[row_start..row_start + row_bytes];
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
            row_start += stride;
        }
    }

    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8) {
        if alpha == 0 {
            return;
        }
        if alpha == 255 {
            self.fill_rect(rect, color);
            return;
        }

        let width = self.size.width;
        let height = self.size.height;

        let max_x = rect.x.saturating_add(rect.w).min(width);
        let max_y = rect.y.saturating_add(rect.h).min(height);
        if rect.x >= max_x || rect.y >= max_y || !self.frame_is_valid() {
            return;
        }

        let row_bytes = (max_x - rect.x) as usize * 4;
        let stride = width as usize * 4;
        let mut row_start = rect.y as usize * stride + rect.x as usize * 4;

        for _ in rect.y..max_y {
            let row = &mut self.frame[row_start..row_start + row_bytes];
            for px in row.chunks_exact_mut(4) {
                blend_pixel(px, color, alpha);
            }
            row_start += stride;
        }
    }

    fn rect_outline(&mut self, rect: Rect, color: Color) {
        if rect.w == 0 || rect.h == 0 {
            return;
        }

        let width = self.size.width;
        let height = self.size.height;

        let x1 = rect.x.saturating_add(rect.w).min(width);
        let y1 = rect.y.saturating_add(rect.h).min(height);
        if rect.x >= x1 || rect.y >= y1 {
            return;
        }

        let w = x1 - rect.x;
        let h = y1 - rect.y;

        // Top / bottom.
        self.fill_rect(Rect::new(rect.x, rect.y, w, 1), color);
        if h > 1 {
            self.fill_rect(Rect::new(rect.x, y1.saturating_sub(1), w, 1), color);
        }

        // Left / right.
        self.fill_rect(Rect::new(rect.x, rect.y, 1, h), color);
        if w > 1 {
            self.fill_rect(Rect::new(x1.saturating_sub(1), rect.y, 1, h), color);
        }
    }

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32) {
        let width = self.size.width;
        let height = self.size.height;
        let scale = scale.max(1);
        let adv_x = glyph_advance_x(scale);
        let adv_y = line_advance_y(scale);

        let mut cursor_x = x;
        let mut cursor_y = y;

        for ch in text.chars() {
            match ch {
                '\n' => {
                    cursor_x = x;
                    cursor_y = cursor_y.saturating_add(adv_y);
                    if cursor_y >= height {
                        break;
                    }
                    continue;
                }
                ' ' => {
                    cursor_x = cursor_x.saturating_add(adv_x);
                    continue;
                }
                _ => {}
            }

            if cursor_x < width {
                draw_char_cpu(self.frame, width, height, cursor_x, cursor_y, ch, color, scale);
            }
            cursor_x = cursor_x.saturating_add(adv_x);
        }
    }

    fn draw_sprite(&mut self, x: u32, y: u32, sprite: &Sprite) {
        if !self.frame_is_valid() {
            return;
        }
        let width = self.size.width;
        let height = self.size.height;
        let src_stride = sprite.width as usize * 4;

        for sy in 0..sprite.height {
            let dy = y.saturating_add(sy);
            if dy >= height {
                break;
            }
            for sx in 0..sprite.width {
                let dx = x.saturating_add(sx);
                if dx >= width {
                    break;
                }
                let src = sy as usize * src_stride + sx as usize * 4;
                let [r, g, b, a] = [
                    sprite.rgba[src],
                    sprite.rgba[src + 1],
                    sprite.rgba[src + 2],
                    sprite.rgba[src + 3],
                ];
                if a == 0 {
                    continue;
                }
                let dst = ((dy * width + dx) * 4) as usize;
                blend_pixel(&mut self.frame[dst..dst + 4], [r, g, b, 255], a);
            }
        }
    }
}

fn blend_pixel(px: &mut [u8], color: Color, alpha: u8) {
    let a = alpha as u32;
    let inv = 255u32 - a;
    for c in 0..3 {
        px[c] = ((px[c] as u32 * inv + color[c] as u32 * a + 127) / 255) as u8;
    }
    px[3] = 255;
}

fn draw_char_cpu(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: u32,
    y: u32,
    ch: char,
    color: Color,
    scale: u32,
) {
    let rows = glyph_rows(ch);
    for (row, bits) in rows.into_iter().enumerate() {
        let py0 = y.saturating_add((row as u32).saturating_mul(scale));
        for col in 0..GLYPH_W {
            let mask = 1u8 << (GLYPH_W - 1 - col);
            if (bits & mask) == 0 {
                continue;
            }
            let px0 = x.saturating_add(col.saturating_mul(scale));
            for dy in 0..scale {
                for dx in 0..scale {
                    set_pixel_cpu(frame, width, height, px0 + dx, py0 + dy, color);
                }
            }
        }
    }
}

fn set_pixel_cpu(frame: &mut [u8], width: u32, height: u32, x: u32, y: u32, color: Color) {
    if x >= width || y >= height {
        return;
    }
    let idx = ((y * width + x) * 4) as usize;
    if idx + 4 <= frame.len() {
        frame[idx..idx + 4].copy_from_slice(&color);
    }
}

fn glyph_rows(ch: char) -> [u8; GLYPH_H as usize] {
    let c = ch.to_ascii_uppercase();
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],

        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b111, 0b101, 0b111, 0b110, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],

        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '?' => [0b111, 0b001, 0b010, 0b000, 0b010],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        '_' => [0b000, 0b000, 0b000, 0b000, 0b111],

        _ => [0b111, 0b001, 0b010, 0b000, 0b010],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * width + x) * 4) as usize;
        [frame[idx], frame[idx + 1], frame[idx + 2], frame[idx + 3]]
    }

    #[test]
    fn fill_rect_clips_to_surface() {
        let size = SurfaceSize::new(4, 4);
        let mut frame = vec![0u8; size.rgba_len()];
        let mut gfx = CpuRenderer::new(&mut frame, size);
        gfx.fill_rect(Rect::new(2, 2, 10, 10), [255, 0, 0, 255]);

        assert_eq!(pixel(&frame, 4, 3, 3), [255, 0, 0, 255]);
        assert_eq!(pixel(&frame, 4, 1, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn blend_rect_mixes_towards_color() {
        let size = SurfaceSize::new(1, 1);
        let mut frame = vec![0, 0, 0, 255];
        let mut gfx = CpuRenderer::new(&mut frame, size);
        gfx.blend_rect(Rect::from_size(1, 1), [255, 255, 255, 255], 128);
        assert_eq!(pixel(&frame, 1, 0, 0), [128, 128, 128, 255]);
    }

    #[test]
    fn sprite_rejects_mismatched_buffers() {
        assert!(Sprite::from_rgba(2, 2, vec![0; 15]).is_none());
        assert!(Sprite::from_rgba(2, 2, vec![0; 16]).is_some());
    }

    #[test]
    fn draw_sprite_skips_transparent_pixels() {
        let size = SurfaceSize::new(2, 1);
        let mut frame = vec![9u8; size.rgba_len()];
        let sprite = Sprite::from_rgba(2, 1, vec![10, 20, 30, 255, 99, 99, 99, 0]).unwrap();
        let mut gfx = CpuRenderer::new(&mut frame, size);
        gfx.draw_sprite(0, 0, &sprite);

        assert_eq!(pixel(&frame, 2, 0, 0), [10, 20, 30, 255]);
        assert_eq!(pixel(&frame, 2, 1, 0), [9, 9, 9, 9]);
    }

    #[test]
    fn text_metrics_match_glyph_grid() {
        assert_eq!(text_width("AB", 1), 7);
        assert_eq!(text_height("A", 3), 15);
        assert_eq!(text_height("A\nB", 1), 11);
        assert_eq!(text_width("", 2), 0);
    }

    #[test]
    fn draw_text_lights_glyph_pixels() {
        let size = SurfaceSize::new(8, 8);
        let mut frame = vec![0u8; size.rgba_len()];
        let mut gfx = CpuRenderer::new(&mut frame, size);
        gfx.draw_text_scaled(0, 0, "1", [200, 0, 0, 255], 1);

        // Top row of '1' is 0b010.
        assert_eq!(pixel(&frame, 8, 1, 0), [200, 0, 0, 255]);
        assert_eq!(pixel(&frame, 8, 0, 0), [0, 0, 0, 0]);
    }
}
