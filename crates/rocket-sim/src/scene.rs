//! What a renderer would draw for the current tick.

use rocket_core::{PropKind, Pose, Run, SegmentKind};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pose: Pose,
    pub mouse: Sprite,
    pub flames: Sprite,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentView {
    pub kind: SegmentKind,
    pub x: f32,
    pub y: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropView {
    pub kind: PropKind,
    pub sprite: Sprite,
}

/// Draw list for one tick, in world coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot {
    pub scroll_offset: f32,
    pub player: PlayerView,
    pub hazard: Vec<SegmentView>,
    pub props: Vec<PropView>,
    pub coin_pool: usize,
    /// Positions of the visible coins.
    pub coins: Vec<[f32; 2]>,
}

impl SceneSnapshot {
    pub fn capture(run: &Run, scroll_offset: f32) -> Self {
        let world = run.world();
        let player = &world.player;
        let mouse = player.mouse_position();
        let flames = player.flames_position();

        Self {
            scroll_offset,
            player: PlayerView {
                pose: player.pose(),
                mouse: Sprite {
                    x: mouse.x,
                    y: mouse.y,
                    visible: player.mouse.visible,
                },
                flames: Sprite {
                    x: flames.x,
                    y: flames.y,
                    visible: player.jetpack_visible(),
                },
            },
            hazard: world
                .hazard
                .segments()
                .iter()
                .map(|segment| SegmentView {
                    kind: segment.kind,
                    x: segment.anchor.x,
                    y: segment.anchor.y,
                    height: segment.height,
                })
                .collect(),
            props: world
                .props
                .props()
                .iter()
                .map(|prop| PropView {
                    kind: prop.kind,
                    sprite: Sprite {
                        x: prop.x,
                        y: prop.y,
                        visible: prop.visible,
                    },
                })
                .collect(),
            coin_pool: world.coins.capacity(),
            coins: world
                .coins
                .slots()
                .iter()
                .filter(|slot| slot.is_visible())
                .map(|slot| [slot.position.x, slot.position.y])
                .collect(),
        }
    }
}
