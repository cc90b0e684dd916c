//! Mirrors of the physics bodies owned by the external physics host.
//!
//! The core never integrates. It writes body positions after every visual
//! move and velocity/acceleration set-points for the player; the host writes
//! back integrated motion and contact flags.

use bevy::math::Vec2;

/// Collision footprint of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    /// Axis-aligned box; `position` is its top-left corner.
    Rect { size: Vec2 },
    /// Circle; `position` is its center.
    Circle { radius: f32 },
}

/// A physics body rigidly attached to a visual anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub shape: BodyShape,
    /// Fixed offset from the visual anchor.
    pub offset: Vec2,
    pub position: Vec2,
    pub enabled: bool,
}

impl Body {
    pub fn rect(size: Vec2, offset: Vec2) -> Self {
        Self {
            shape: BodyShape::Rect { size },
            offset,
            position: offset,
            enabled: true,
        }
    }

    pub fn circle(radius: f32) -> Self {
        Self {
            shape: BodyShape::Circle { radius },
            offset: Vec2::ZERO,
            position: Vec2::ZERO,
            enabled: true,
        }
    }

    /// Recomputes the body position from the visual anchor.
    pub fn sync_to(&mut self, anchor: Vec2) {
        self.position = anchor + self.offset;
    }

    pub fn is_synced_with(&self, anchor: Vec2) -> bool {
        (self.position - (anchor + self.offset)).abs().max_element() <= 1e-3
    }

    /// Axis-aligned `(min, max)` corners of the footprint.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        match self.shape {
            BodyShape::Rect { size } => (self.position, self.position + size),
            BodyShape::Circle { radius } => (
                self.position - Vec2::splat(radius),
                self.position + Vec2::splat(radius),
            ),
        }
    }

    /// AABB overlap test against another body. Disabled bodies never overlap.
    pub fn overlaps(&self, other: &Body) -> bool {
        if !self.enabled || !other.enabled {
            return false;
        }
        let (a_min, a_max) = self.bounds();
        let (b_min, b_max) = other.bounds();
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }
}

/// Motion state of a dynamic body.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Motion {
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// Set by the host when the body rests on something below it.
    pub blocked_down: bool,
}
