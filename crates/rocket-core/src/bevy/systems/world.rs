//! World streaming systems.

use bevy::prelude::*;

use crate::bevy::{RunRes, ScrollFrameRes, WorldTeleportedEvent};

pub fn recycle_world(frame: Res<ScrollFrameRes>, mut run: ResMut<RunRes>) {
    let report = run.run.recycle(&frame.frame);
    if report.hazard_moved || report.props_moved > 0 {
        tracing::trace!(
            "[stream] recycled {} props, hazard={} at offset {:.1}",
            report.props_moved,
            report.hazard_moved,
            frame.frame.offset
        );
    }
}

/// Shifts the world back and hands the shifted scroll offset to the host.
pub fn teleport_world(
    mut frame: ResMut<ScrollFrameRes>,
    mut run: ResMut<RunRes>,
    mut teleported: MessageWriter<WorldTeleportedEvent>,
) {
    let Some(shifted) = run.run.teleport(&frame.frame) else {
        return;
    };

    frame.frame = shifted;
    teleported.write(WorldTeleportedEvent {
        modulus: run.run.modulus(),
        scroll_offset: shifted.offset,
    });
}
