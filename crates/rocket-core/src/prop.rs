//! Background decorations recycled ahead of the viewport.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{Lookahead, PropConfig};
use crate::scroll::ScrollFrame;
use crate::teleport::ShiftX;

/// Kind of decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropKind {
    MouseHole,
    Window,
    Bookcase,
}

/// Overlap-avoidance group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropGroup {
    Windows,
    Bookcases,
}

impl PropKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::MouseHole => "mouse hole",
            Self::Window => "window",
            Self::Bookcase => "bookcase",
        }
    }

    /// Group this kind belongs to.
    pub fn group(self) -> Option<PropGroup> {
        match self {
            Self::MouseHole => None,
            Self::Window => Some(PropGroup::Windows),
            Self::Bookcase => Some(PropGroup::Bookcases),
        }
    }

    /// Group this kind must not visually overlap with.
    pub fn avoids(self) -> Option<PropGroup> {
        match self {
            Self::MouseHole => None,
            Self::Window => Some(PropGroup::Bookcases),
            Self::Bookcase => Some(PropGroup::Windows),
        }
    }
}

/// A recyclable decoration.
#[derive(Debug, Clone, PartialEq)]
pub struct Prop {
    pub kind: PropKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub visible: bool,
    pub lookahead: Lookahead,
}

impl Prop {
    pub fn new(kind: PropKind, x: f32, y: f32, width: f32, lookahead: Lookahead) -> Self {
        Self {
            kind,
            x,
            y,
            width,
            visible: true,
            lookahead,
        }
    }

    /// Places the prop at a random x inside its configured initial range.
    pub fn from_config(config: &PropConfig, rng: &mut impl Rng) -> Self {
        let [min, max] = config.initial_x;
        let x = rng.random_range(min..=max);
        Self::new(config.kind, x, config.y, config.width, config.lookahead)
    }

    pub fn has_exited(&self, frame: &ScrollFrame) -> bool {
        frame.has_passed(self.x, self.width)
    }

    /// Draws a new x from the lookahead window ahead of the viewport.
    pub fn candidate_x(&self, frame: &ScrollFrame, rng: &mut impl Rng) -> f32 {
        let (min, max) = self.lookahead.range(frame.right_edge(), self.width);
        rng.random_range(min..=max)
    }
}

impl ShiftX for Prop {
    fn shift_x(&mut self, dx: f32) {
        self.x += dx;
    }
}

/// All props of a run, processed in declared order.
#[derive(Debug, Clone, Default)]
pub struct PropSet {
    props: Vec<Prop>,
}

impl PropSet {
    pub fn new(props: Vec<Prop>) -> Self {
        Self { props }
    }

    pub fn from_config(configs: &[PropConfig], rng: &mut impl Rng) -> Self {
        Self::new(configs.iter().map(|c| Prop::from_config(c, rng)).collect())
    }

    pub fn props(&self) -> &[Prop] {
        &self.props
    }

    /// Recycles every prop that left the screen. Returns how many moved.
    ///
    /// Each prop compares its new x against the siblings' x as they are at
    /// that moment, so a sibling later in the order is still at its old spot.
    pub fn wrap(&mut self, frame: &ScrollFrame, rng: &mut impl Rng) -> usize {
        let mut moved = 0;
        for index in 0..self.props.len() {
            if self.wrap_one(index, frame, rng) {
                moved += 1;
            }
        }
        moved
    }

    fn wrap_one(&mut self, index: usize, frame: &ScrollFrame, rng: &mut impl Rng) -> bool {
        let prop = &self.props[index];
        if !prop.has_exited(frame) {
            return false;
        }

        let new_x = prop.candidate_x(frame, rng);
        let hidden = self.overlaps_avoided(index, new_x);

        let prop = &mut self.props[index];
        tracing::debug!(
            "[props] {} {:.1} -> {:.1}{}",
            prop.kind.label(),
            prop.x,
            new_x,
            if hidden { " (hidden)" } else { "" }
        );
        prop.x = new_x;
        prop.visible = !hidden;
        true
    }

    /// Whether the prop at `index`, placed at `x`, would overlap a member of the group it avoids.
    pub fn overlaps_avoided(&self, index: usize, x: f32) -> bool {
        let prop = &self.props[index];
        let Some(avoided) = prop.kind.avoids() else {
            return false;
        };

        self.props
            .iter()
            .enumerate()
            .filter(|(i, sibling)| *i != index && sibling.kind.group() == Some(avoided))
            .any(|(_, sibling)| (x - sibling.x).abs() <= prop.width.max(sibling.width))
    }
}

impl ShiftX for PropSet {
    fn shift_x(&mut self, dx: f32) {
        for prop in &mut self.props {
            prop.shift_x(dx);
        }
    }
}
