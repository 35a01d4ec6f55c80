//! WebGPU rendering module
//!
//! The game draws into a software `Framebuffer`; this module uploads it and
//! scales it to the surface with nearest-neighbour integer scaling.

pub mod pixel_pipeline;

pub use pixel_pipeline::PixelRenderState;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Where the logical screen lands on the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Top-left corner in surface pixels (negative when cropped)
    pub x: f32,
    pub y: f32,
    /// Surface pixels per logical pixel
    pub scale: u32,
}

impl Viewport {
    /// Center the screen on a `width` x `height` surface
    ///
    /// `requested_scale` 0 picks the largest integer scale that fits; a fixed
    /// scale too large for the surface is reduced to fit.
    pub fn fit(width: u32, height: u32, requested_scale: u32) -> Self {
        let fit = (width / SCREEN_WIDTH).min(height / SCREEN_HEIGHT).max(1);
        let scale = if requested_scale == 0 {
            fit
        } else {
            requested_scale.min(fit)
        };
        Self {
            x: (width as f32 - (SCREEN_WIDTH * scale) as f32) / 2.0,
            y: (height as f32 - (SCREEN_HEIGHT * scale) as f32) / 2.0,
            scale,
        }
    }

    /// Width and height on the surface
    pub fn size(&self) -> (f32, f32) {
        (
            (SCREEN_WIDTH * self.scale) as f32,
            (SCREEN_HEIGHT * self.scale) as f32,
        )
    }

    /// Surface position to logical screen position, clamped to the screen
    pub fn to_logical(&self, px: f32, py: f32) -> (f32, f32) {
        let scale = self.scale as f32;
        (
            ((px - self.x) / scale).clamp(0.0, SCREEN_WIDTH as f32 - 1.0),
            ((py - self.y) / scale).clamp(0.0, SCREEN_HEIGHT as f32 - 1.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_picks_largest_integer_scale() {
        let vp = Viewport::fit(1920, 1080, 0);
        assert_eq!(vp.scale, 4);
        assert_eq!(vp.size(), (1280.0, 960.0));
        assert_eq!((vp.x, vp.y), (320.0, 60.0));
    }

    #[test]
    fn test_requested_scale_is_capped() {
        assert_eq!(Viewport::fit(1920, 1080, 2).scale, 2);
        assert_eq!(Viewport::fit(640, 480, 5).scale, 2);
    }

    #[test]
    fn test_tiny_surface_crops() {
        let vp = Viewport::fit(300, 200, 0);
        assert_eq!(vp.scale, 1);
        assert_eq!((vp.x, vp.y), (-10.0, -20.0));
    }

    #[test]
    fn test_to_logical_clamps() {
        let vp = Viewport::fit(1920, 1080, 0);
        assert_eq!(vp.to_logical(320.0, 60.0), (0.0, 0.0));
        assert_eq!(vp.to_logical(960.0, 540.0), (160.0, 120.0));
        assert_eq!(vp.to_logical(0.0, 2000.0), (0.0, 239.0));
        assert_eq!(vp.to_logical(1919.0, 0.0).0, 319.0);
    }
}
