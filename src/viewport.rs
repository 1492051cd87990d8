//! Viewport bookkeeping for the resize handler.
//!
//! winit reports window sizes in physical pixels together with the display's scale
//! factor. The renderer draws into a buffer of `logical size * pixel ratio`, where the
//! pixel ratio is the host's device pixel ratio clamped to [`MAX_PIXEL_RATIO`] so that
//! very dense displays don't multiply the fill-rate cost.

use winit::dpi::PhysicalSize;

/// Upper bound for the pixel ratio used by the renderer.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Clamp a host-reported device pixel ratio to at most [`MAX_PIXEL_RATIO`].
///
/// Non-finite or non-positive ratios fall back to `1.0`.
pub fn clamp_pixel_ratio(ratio: f64) -> f64 {
    if !ratio.is_finite() || ratio <= 0.0 {
        return 1.0;
    }
    ratio.min(MAX_PIXEL_RATIO)
}

/// Current size of the drawable area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Window width in physical pixels as reported by the host.
    pub width: u32,
    /// Window height in physical pixels as reported by the host.
    pub height: u32,
    /// Device pixel ratio as reported by the host (unclamped).
    pub scale_factor: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scale_factor: f64) -> Self {
        Self {
            width,
            height,
            scale_factor,
        }
    }

    pub fn from_physical(size: PhysicalSize<u32>, scale_factor: f64) -> Self {
        Self::new(size.width, size.height, scale_factor)
    }

    /// A viewport with a zero edge cannot be rendered to and is skipped on resize.
    pub fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width / height. Physical and logical sizes share the same ratio.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn logical_size(&self) -> (f64, f64) {
        let scale = if self.scale_factor.is_finite() && self.scale_factor > 0.0 {
            self.scale_factor
        } else {
            1.0
        };
        (self.width as f64 / scale, self.height as f64 / scale)
    }

    /// The pixel ratio the renderer actually uses.
    pub fn pixel_ratio(&self) -> f64 {
        clamp_pixel_ratio(self.scale_factor)
    }

    /// Size of the drawing buffer: logical size times the clamped pixel ratio.
    pub fn drawing_buffer(&self) -> PhysicalSize<u32> {
        let (width, height) = self.logical_size();
        let ratio = self.pixel_ratio();
        PhysicalSize::new(
            ((width * ratio).round() as u32).max(1),
            ((height * ratio).round() as u32).max(1),
        )
    }
}
