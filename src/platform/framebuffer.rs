//! Software framebuffer
//!
//! A fixed 320x240 grid of palette indices. The game draws into it through
//! `Display`; the renderer uploads it to the GPU once per frame.

use super::Display;
use super::font;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

#[derive(Debug, Clone)]
pub struct Framebuffer {
    pixels: Vec<u8>,
    frame_count: u64,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    pub fn new() -> Self {
        Self {
            pixels: vec![0; (SCREEN_WIDTH * SCREEN_HEIGHT) as usize],
            frame_count: 0,
        }
    }

    pub fn width(&self) -> u32 {
        SCREEN_WIDTH
    }

    pub fn height(&self) -> u32 {
        SCREEN_HEIGHT
    }

    /// Palette indices, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Color at (x, y), `None` outside the screen
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Count pixels that differ from `background`
    pub fn lit_pixels(&self, background: u8) -> usize {
        self.pixels.iter().filter(|&&p| p != background).count()
    }

    /// Called by the frame driver once per presented frame
    pub fn advance_frame(&mut self) {
        self.frame_count += 1;
    }

    /// Pack four indices per word for the GPU storage buffer
    pub fn packed(&self) -> Vec<u32> {
        self.pixels
            .chunks(4)
            .map(|c| {
                c.iter()
                    .enumerate()
                    .fold(0u32, |word, (i, &p)| word | ((p as u32 & 0xFF) << (i * 8)))
            })
            .collect()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= SCREEN_WIDTH as i32 || y >= SCREEN_HEIGHT as i32 {
            return None;
        }
        Some(y as usize * SCREEN_WIDTH as usize + x as usize)
    }
}

impl Display for Framebuffer {
    fn clear(&mut self, color: u8) {
        self.pixels.fill(color);
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: u8) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    fn text(&mut self, x: i32, y: i32, text: &str, color: u8) {
        for (dx, dy) in font::text_pixels(text) {
            self.set_pixel(x + dx, y + dy, color);
        }
    }

    fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_pixels_ignored() {
        let mut fb = Framebuffer::new();
        fb.set_pixel(-1, 0, 7);
        fb.set_pixel(0, 240, 7);
        fb.set_pixel(320, 10, 7);
        assert_eq!(fb.lit_pixels(0), 0);

        fb.set_pixel(319, 239, 7);
        assert_eq!(fb.get(319, 239), Some(7));
        assert_eq!(fb.get(320, 239), None);
    }

    #[test]
    fn test_clear_fills_screen() {
        let mut fb = Framebuffer::new();
        fb.clear(3);
        assert_eq!(fb.lit_pixels(0), 320 * 240);
        assert_eq!(fb.get(100, 100), Some(3));
    }

    #[test]
    fn test_text_clips_at_edge() {
        let mut fb = Framebuffer::new();
        fb.text(318, 0, "-", 8);
        assert_eq!(fb.get(318, 2), Some(8));
        assert_eq!(fb.get(319, 2), Some(8));
        assert_eq!(fb.lit_pixels(0), 2);
    }

    #[test]
    fn test_packed_little_endian() {
        let mut fb = Framebuffer::new();
        fb.set_pixel(0, 0, 1);
        fb.set_pixel(1, 0, 2);
        fb.set_pixel(3, 0, 15);
        let packed = fb.packed();
        assert_eq!(packed.len(), 320 * 240 / 4);
        assert_eq!(packed[0], 0x0F00_0201);
    }

    #[test]
    fn test_frame_counter() {
        let mut fb = Framebuffer::new();
        fb.advance_frame();
        fb.advance_frame();
        assert_eq!(fb.frame_count(), 2);
    }
}
