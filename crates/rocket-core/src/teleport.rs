//! Backward world shift that keeps coordinates bounded.
//!
//! Once the scroll offset passes the modulus, every tracked entity moves back
//! by exactly the modulus in a single call: nothing is rendered in between,
//! so relative layout on screen is unchanged.

use rand::Rng;

use crate::config::TeleportConfig;
use crate::scroll::ScrollFrame;
use crate::world::World;

/// Horizontal translation applied by a teleport.
///
/// Implementors must move any attached body along with the visual.
pub trait ShiftX {
    fn shift_x(&mut self, dx: f32);
}

/// Checks the scroll offset against the modulus and performs the shift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleportController {
    modulus: f32,
}

impl TeleportController {
    pub fn new(modulus: f32) -> Self {
        Self { modulus }
    }

    pub fn from_config(config: &TeleportConfig) -> Self {
        Self::new(config.modulus())
    }

    pub fn modulus(&self) -> f32 {
        self.modulus
    }

    pub fn should_teleport(&self, frame: &ScrollFrame) -> bool {
        frame.offset > self.modulus
    }

    /// Shifts the world back when due and re-seeds the coin row.
    ///
    /// Returns the shifted scroll frame so the host can move its camera.
    pub fn apply(
        &self,
        world: &mut World,
        frame: &ScrollFrame,
        rng: &mut impl Rng,
    ) -> Option<ScrollFrame> {
        if !self.should_teleport(frame) {
            return None;
        }

        world.shift_x(-self.modulus);
        let shifted = frame.shifted_back(self.modulus);
        world.coins.spawn(&shifted, None, rng);

        tracing::info!(
            "[teleport] scroll {:.1} -> {:.1}, player x={:.1}",
            frame.offset,
            shifted.offset,
            world.player.position().x
        );
        Some(shifted)
    }
}

#[cfg(test)]
mod tests {
    use bevy::math::Vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::config::RunConfig;

    fn world(rng: &mut ChaCha8Rng) -> World {
        World::from_config(&RunConfig::default(), rng)
    }

    #[test]
    fn test_below_modulus_does_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let mut world = world(&mut rng);
        let before = world.player.position();
        let controller = TeleportController::new(2380.0);

        let frame = ScrollFrame::new(2380.0, 800.0, 640.0);
        assert!(controller.apply(&mut world, &frame, &mut rng).is_none());
        assert_eq!(world.player.position(), before);
    }

    #[test]
    fn test_documented_shift_scenario() {
        let mut rng = ChaCha8Rng::seed_from_u64(32);
        let mut world = world(&mut rng);
        world.player.set_position(Vec2::new(2400.0, 610.0));
        world.hazard.body.offset = Vec2::new(12.0, 0.0);
        world.hazard.set_position(Vec2::new(2450.0, 100.0));

        let controller = TeleportController::new(2380.0);
        let frame = ScrollFrame::new(2390.0, 800.0, 640.0);
        let shifted = controller.apply(&mut world, &frame, &mut rng).unwrap();

        assert!((shifted.offset - 10.0).abs() < 1e-3);
        assert!((world.player.position().x - 20.0).abs() < 1e-3);
        assert!(world.player.body.is_synced_with(world.player.position()));
        assert!((world.hazard.x() - 70.0).abs() < 1e-3);
        assert!((world.hazard.body.position.x - 82.0).abs() < 1e-3);
    }

    #[test]
    fn test_relative_layout_is_preserved() {
        let mut rng = ChaCha8Rng::seed_from_u64(33);
        let mut world = world(&mut rng);
        world.player.set_position(Vec2::new(2500.0, 610.0));

        let props_before: Vec<f32> = world.props.props().iter().map(|p| p.x).collect();
        let hazard_before = world.hazard.x();
        let player_before = world.player.position().x;

        let controller = TeleportController::new(2380.0);
        let frame = ScrollFrame::new(2400.0, 800.0, 640.0);
        controller.apply(&mut world, &frame, &mut rng).unwrap();

        for (prop, before) in world.props.props().iter().zip(&props_before) {
            assert!((prop.x - (before - 2380.0)).abs() < 1e-3);
            assert!(((prop.x - world.player.position().x) - (before - player_before)).abs() < 1e-3);
        }
        assert!((world.hazard.x() - (hazard_before - 2380.0)).abs() < 1e-3);
    }

    #[test]
    fn test_coins_reseeded_ahead_of_shifted_view() {
        let mut rng = ChaCha8Rng::seed_from_u64(34);
        let mut world = world(&mut rng);
        let controller = TeleportController::new(2380.0);
        let frame = ScrollFrame::new(2400.0, 800.0, 640.0);

        let shifted = controller.apply(&mut world, &frame, &mut rng).unwrap();

        let active: Vec<f32> = world.coins.active_slots().map(|(_, s)| s.position.x).collect();
        assert!(!active.is_empty());
        assert!((active[0] - (shifted.right_edge() + 100.0)).abs() < 1e-3);
        for (_, slot) in world.coins.active_slots() {
            assert!(slot.body.is_synced_with(slot.position));
        }
    }
}
