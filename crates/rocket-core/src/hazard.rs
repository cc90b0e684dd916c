//! The periodic laser hazard.

use bevy::math::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::config::{HazardConfig, Lookahead};
use crate::scroll::ScrollFrame;
use crate::teleport::ShiftX;

/// Visual pieces of the hazard, stacked top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    TopCap,
    Beam,
    BottomCap,
}

/// One visual piece: its kind, top-center anchor and height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub anchor: Vec2,
    pub height: f32,
}

/// Laser obstacle: three rigid segments plus one static body.
///
/// The body does not follow the visual transform on its own; every
/// position change goes through [`Hazard::set_position`].
#[derive(Debug, Clone, PartialEq)]
pub struct Hazard {
    position: Vec2,
    pub width: f32,
    pub height: f32,
    pub end_height: f32,
    pub lookahead: Lookahead,
    pub y_range: [f32; 2],
    pub body: Body,
}

impl Hazard {
    pub fn from_config(config: &HazardConfig) -> Self {
        let [ox, oy] = config.body_offset;
        let [x, y] = config.initial_position;
        let mut hazard = Self {
            position: Vec2::new(x, y),
            width: config.width,
            height: config.height,
            end_height: config.end_height,
            lookahead: config.lookahead,
            y_range: config.y_range,
            body: Body::rect(
                Vec2::new(config.width, config.height),
                Vec2::new(ox, oy),
            ),
        };
        hazard.body.sync_to(hazard.position);
        hazard
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    /// Moves the hazard and its body together.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.body.sync_to(position);
    }

    pub fn has_exited(&self, frame: &ScrollFrame) -> bool {
        frame.has_passed(self.position.x, self.width)
    }

    /// Relocates the hazard ahead of the viewport once it has left the screen.
    pub fn wrap(&mut self, frame: &ScrollFrame, rng: &mut impl Rng) -> bool {
        if !self.has_exited(frame) {
            return false;
        }

        let (min, max) = self.lookahead.range(frame.right_edge(), self.width);
        let [y_min, y_max] = self.y_range;
        let next = Vec2::new(rng.random_range(min..=max), rng.random_range(y_min..=y_max));

        tracing::debug!("[hazard] {:?} -> {:?}", self.position, next);
        self.set_position(next);
        true
    }

    /// Top cap, stretched beam, and bottom cap in world space.
    pub fn segments(&self) -> [Segment; 3] {
        let beam = self.height - self.end_height * 2.0;
        let at = |dy: f32| Vec2::new(self.position.x, self.position.y + dy);
        [
            Segment {
                kind: SegmentKind::TopCap,
                anchor: at(0.0),
                height: self.end_height,
            },
            Segment {
                kind: SegmentKind::Beam,
                anchor: at(self.end_height),
                height: beam,
            },
            Segment {
                kind: SegmentKind::BottomCap,
                anchor: at(self.end_height + beam),
                height: self.end_height,
            },
        ]
    }
}

impl ShiftX for Hazard {
    fn shift_x(&mut self, dx: f32) {
        self.set_position(self.position + Vec2::new(dx, 0.0));
    }
}
