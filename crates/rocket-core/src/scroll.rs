//! Camera scroll as seen by the world logic.

use crate::config::ViewportConfig;

/// Horizontal scroll offset plus viewport size, sampled once per tick.
///
/// The host owns the camera; the core only reads this, except for the
/// backward shift reported by a teleport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollFrame {
    pub offset: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl ScrollFrame {
    pub const fn new(offset: f32, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            offset,
            viewport_width,
            viewport_height,
        }
    }

    pub fn from_viewport(viewport: &ViewportConfig, offset: f32) -> Self {
        Self::new(offset, viewport.width, viewport.height)
    }

    /// World x of the viewport's right edge.
    pub fn right_edge(&self) -> f32 {
        self.offset + self.viewport_width
    }

    /// True once an entity spanning `[x, x + width]` is fully past the left edge.
    pub fn has_passed(&self, x: f32, width: f32) -> bool {
        x + width < self.offset
    }

    pub fn with_offset(&self, offset: f32) -> Self {
        Self { offset, ..*self }
    }

    pub fn shifted_back(&self, distance: f32) -> Self {
        self.with_offset(self.offset - distance)
    }
}
