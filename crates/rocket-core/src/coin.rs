//! Fixed pool of collectible coins laid out ahead of the viewport.

use bevy::math::Vec2;
use rand::Rng;

use crate::body::Body;
use crate::config::CoinConfig;
use crate::scroll::ScrollFrame;
use crate::teleport::ShiftX;

/// Activation state of a pool slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoinState {
    #[default]
    Inactive,
    Active,
}

/// One reusable coin.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinSlot {
    pub position: Vec2,
    pub state: CoinState,
    pub body: Body,
}

impl CoinSlot {
    fn new(radius: f32) -> Self {
        let mut body = Body::circle(radius);
        body.enabled = false;
        Self {
            position: Vec2::ZERO,
            state: CoinState::Inactive,
            body,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == CoinState::Active
    }

    pub fn is_visible(&self) -> bool {
        self.is_active()
    }

    fn activate(&mut self, position: Vec2) {
        self.position = position;
        self.state = CoinState::Active;
        self.body.enabled = true;
        self.body.sync_to(position);
    }

    fn deactivate(&mut self) {
        self.state = CoinState::Inactive;
        self.body.enabled = false;
    }
}

impl ShiftX for CoinSlot {
    fn shift_x(&mut self, dx: f32) {
        self.position.x += dx;
        self.body.sync_to(self.position);
    }
}

/// Pool-backed coin spawner. The pool never grows or shrinks.
#[derive(Debug, Clone)]
pub struct CoinField {
    slots: Vec<CoinSlot>,
    config: CoinConfig,
}

impl CoinField {
    pub fn new(config: CoinConfig) -> Self {
        let radius = config.width * 0.5;
        Self {
            slots: (0..config.pool_size).map(|_| CoinSlot::new(radius)).collect(),
            config,
        }
    }

    pub fn slots(&self) -> &[CoinSlot] {
        &self.slots
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }

    pub fn active_slots(&self) -> impl Iterator<Item = (usize, &CoinSlot)> {
        self.slots.iter().enumerate().filter(|(_, s)| s.is_active())
    }

    /// Deactivates every slot.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.deactivate();
        }
    }

    /// Replaces the active set with a fresh row of coins past the right edge.
    ///
    /// When `count` is `None` it is drawn from the configured range. Counts
    /// larger than the pool are clamped. Returns the number placed.
    pub fn spawn(
        &mut self,
        frame: &ScrollFrame,
        count: Option<usize>,
        rng: &mut impl Rng,
    ) -> usize {
        self.clear();

        let [min, max] = self.config.count_range;
        let requested = count.unwrap_or_else(|| rng.random_range(min..=max));
        let count = requested.min(self.slots.len());
        if count < requested {
            tracing::warn!(
                "[coins] requested {} coins but the pool holds {}",
                requested,
                self.slots.len()
            );
        }

        let (y_min, y_max) = self.band(frame.viewport_height);
        let step = self.config.step();
        let start = frame.right_edge() + self.config.first_gap;
        let mut x = start;

        for slot in self.slots.iter_mut().take(count) {
            let y = rng.random_range(y_min..=y_max);
            slot.activate(Vec2::new(x, y));
            x += step;
        }

        tracing::debug!("[coins] spawned {} coins from x={:.1}", count, start);
        count
    }

    /// Vertical range coins may occupy in a frame of `height`.
    ///
    /// A frame too short for both margins collapses the band to its middle.
    fn band(&self, height: f32) -> (f32, f32) {
        let margin = self.config.band_margin;
        if height - margin >= margin {
            return (margin, height - margin);
        }

        tracing::warn!(
            "[coins] viewport height {} leaves no band for margin {}, using the middle",
            height,
            margin
        );
        let middle = (height * 0.5).max(0.0);
        (middle, middle)
    }

    /// Collects the coin in `index`. Returns true when a point was earned.
    ///
    /// Inactive slots and slots with a disabled body are ignored, so repeated
    /// overlap reports within one activation score once.
    pub fn collect(&mut self, index: usize) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        if !slot.is_active() || !slot.body.enabled {
            return false;
        }
        slot.deactivate();
        true
    }
}

impl ShiftX for CoinField {
    /// Moves active coins only; an inactive slot gets a fresh position on activation.
    fn shift_x(&mut self, dx: f32) {
        for slot in self.slots.iter_mut().filter(|s| s.is_active()) {
            slot.shift_x(dx);
        }
    }
}
