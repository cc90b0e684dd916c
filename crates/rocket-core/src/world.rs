//! Every entity tracked by a run.

use rand::Rng;

use crate::coin::CoinField;
use crate::config::RunConfig;
use crate::hazard::Hazard;
use crate::player::Player;
use crate::prop::PropSet;
use crate::scroll::ScrollFrame;
use crate::teleport::ShiftX;

/// Outcome of one recycle pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecycleReport {
    pub props_moved: usize,
    pub hazard_moved: bool,
}

/// Aggregate of player, props, hazard, and coin pool.
#[derive(Debug, Clone)]
pub struct World {
    pub player: Player,
    pub props: PropSet,
    pub hazard: Hazard,
    pub coins: CoinField,
}

impl World {
    /// Builds the opening layout: props and hazard ahead of the player and
    /// a first row of coins past the right edge.
    pub fn from_config(config: &RunConfig, rng: &mut impl Rng) -> Self {
        let mut world = Self {
            player: Player::new(&config.player, &config.viewport),
            props: PropSet::from_config(&config.props, rng),
            hazard: Hazard::from_config(&config.hazard),
            coins: CoinField::new(config.coins),
        };
        world
            .coins
            .spawn(&ScrollFrame::from_viewport(&config.viewport, 0.0), None, rng);
        world
    }

    /// Repositions every prop and the hazard that left the screen.
    pub fn recycle(&mut self, frame: &ScrollFrame, rng: &mut impl Rng) -> RecycleReport {
        RecycleReport {
            props_moved: self.props.wrap(frame, rng),
            hazard_moved: self.hazard.wrap(frame, rng),
        }
    }
}

impl ShiftX for World {
    fn shift_x(&mut self, dx: f32) {
        self.player.shift_x(dx);
        self.props.shift_x(dx);
        self.hazard.shift_x(dx);
        self.coins.shift_x(dx);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_opening_layout() {
        let mut rng = ChaCha8Rng::seed_from_u64(41);
        let world = World::from_config(&RunConfig::default(), &mut rng);

        let xs: Vec<f32> = world.props.props().iter().map(|p| p.x).collect();
        assert!((900.0..=1500.0).contains(&xs[0]));
        assert!((900.0..=1300.0).contains(&xs[1]));
        assert!((1600.0..=2000.0).contains(&xs[2]));
        assert!((2200.0..=2700.0).contains(&xs[3]));
        assert!((2900.0..=3400.0).contains(&xs[4]));

        assert!((1..=20).contains(&world.coins.active_count()));
        assert!(
            world
                .coins
                .active_slots()
                .all(|(_, s)| s.position.x >= 900.0)
        );
    }

    #[test]
    fn test_recycle_bound_holds_over_long_scroll() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut world = World::from_config(&RunConfig::default(), &mut rng);

        let mut offset = 0.0;
        while offset < 2300.0 {
            let frame = ScrollFrame::new(offset, 800.0, 640.0);
            world.recycle(&frame, &mut rng);

            for prop in world.props.props() {
                assert!(!frame.has_passed(prop.x, prop.width), "{:?} at {offset}", prop.kind);
            }
            assert!(!world.hazard.has_exited(&frame));
            offset += 3.3;
        }
    }
}
