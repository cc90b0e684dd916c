//! Arcade physics host.
//!
//! Stands in for the engine side of the game: integrates the player with
//! gravity and a floor, follows it with the camera, and reports overlaps.
//! All of it runs in `FixedUpdate` before `RunSet::Resolve`.

use bevy::prelude::*;
use rocket_core::bevy::{
    CoinOverlapEvent, FlightInput, HazardOverlapEvent, PlayerBodyFeedback, RunRes, RunSet,
    ScrollFrameRes, TICK_DT,
};

/// World gravity in pixels per second squared (positive is down).
pub const GRAVITY: f32 = 200.0;

/// Host tuning.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ArcadeTuning {
    pub gravity: f32,
    /// Steer the jetpack automatically.
    pub autopilot: bool,
    /// How far ahead of the player the autopilot watches for the hazard.
    pub lookout: f32,
}

impl Default for ArcadeTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            autopilot: true,
            lookout: 350.0,
        }
    }
}

/// Player anchor as integrated this tick.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct HostBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub blocked_down: bool,
}

#[derive(Default)]
pub struct ArcadeHostPlugin {
    pub tuning: ArcadeTuning,
}

impl Plugin for ArcadeHostPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.tuning)
            .insert_resource(HostBody::default());

        app.add_systems(
            FixedUpdate,
            (integrate_player, follow_camera, detect_overlaps, autopilot)
                .chain()
                .before(RunSet::Resolve),
        );
    }
}

/// Semi-implicit Euler step.
///
/// The floor sits at the spawn height and the ceiling keeps the body inside the viewport.
pub fn integrate_player(
    run: Res<RunRes>,
    tuning: Res<ArcadeTuning>,
    mut body: ResMut<HostBody>,
    mut feedback: MessageWriter<PlayerBodyFeedback>,
) {
    let config = run.run.config();
    let player = &run.run.world().player;
    let floor = config.viewport.height - config.player.floor_inset;
    let ceiling = -player.body.offset.y;

    let acceleration = player.motion.acceleration + Vec2::new(0.0, tuning.gravity);
    let mut velocity = player.motion.velocity + acceleration * TICK_DT;
    let mut position = player.position() + velocity * TICK_DT;

    let mut blocked_down = false;
    if position.y >= floor {
        position.y = floor;
        velocity.y = velocity.y.min(0.0);
        blocked_down = true;
    } else if position.y <= ceiling {
        position.y = ceiling;
        velocity.y = velocity.y.max(0.0);
    }

    *body = HostBody {
        position,
        velocity,
        blocked_down,
    };
    feedback.write(PlayerBodyFeedback {
        position,
        velocity,
        blocked_down,
    });
}

/// Keeps the player horizontally centered. The camera never scrolls left of the origin.
pub fn follow_camera(body: Res<HostBody>, mut frame: ResMut<ScrollFrameRes>) {
    let half = frame.frame.viewport_width * 0.5;
    frame.frame.offset = (body.position.x - half).max(0.0);
}

pub fn detect_overlaps(
    run: Res<RunRes>,
    body: Res<HostBody>,
    mut hazard_hits: MessageWriter<HazardOverlapEvent>,
    mut coin_hits: MessageWriter<CoinOverlapEvent>,
) {
    let world = run.run.world();
    let mut player_body = world.player.body;
    player_body.sync_to(body.position);

    if player_body.overlaps(&world.hazard.body) {
        hazard_hits.write(HazardOverlapEvent);
    }
    for (slot, coin) in world.coins.active_slots() {
        if player_body.overlaps(&coin.body) {
            coin_hits.write(CoinOverlapEvent { slot });
        }
    }
}

/// Climbs over the hazard when it blocks the floor lane, otherwise runs.
pub fn autopilot(
    run: Res<RunRes>,
    tuning: Res<ArcadeTuning>,
    body: Res<HostBody>,
    mut flight: ResMut<FlightInput>,
) {
    if !tuning.autopilot {
        return;
    }

    let config = run.run.config();
    let world = run.run.world();
    let floor = config.viewport.height - config.player.floor_inset;
    let [_, body_height] = config.player.body_size();
    let body_top = world.player.body.offset.y;
    let body_bottom = body_top + body_height;
    let (hazard_min, hazard_max) = world.hazard.body.bounds();

    let ahead = hazard_max.x > body.position.x && hazard_min.x - body.position.x < tuning.lookout;
    let blocks_floor = hazard_max.y > floor + body_top;

    flight.external = ahead
        && blocks_floor
        && body.position.y + body_bottom > hazard_min.y - 10.0
        && body.velocity.y > -250.0;
}
