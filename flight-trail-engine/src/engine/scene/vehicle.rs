use bevy::prelude::*;
use bevy::window::RequestRedraw;

use crate::engine::scene::flight_scene::{FlightDriver, VehicleNode};

/// Per-frame tick: advances progress, moves the vehicle, feeds the trail and
/// asks for another frame. A trail allocation failure ends the session.
pub fn advance_flight(
    mut driver: ResMut<FlightDriver>,
    mut vehicles: Query<&mut Transform, With<VehicleNode>>,
    mut redraw: EventWriter<RequestRedraw>,
    mut exit: EventWriter<AppExit>,
) {
    let outcome = match driver.tick() {
        Ok(Some(outcome)) => outcome,
        Ok(None) => return,
        Err(err) => {
            error!("Flight aborted: {err}");
            exit.write(AppExit::error());
            return;
        }
    };

    if let Some(pose) = outcome.pose {
        for mut transform in &mut vehicles {
            transform.translation = pose.position;
            transform.rotation = pose.orientation;
        }
    }

    if outcome.wrapped {
        info!("Loop {} completed", driver.loops_completed());
    }

    if outcome.render_requested {
        redraw.write(RequestRedraw);
    }
}
