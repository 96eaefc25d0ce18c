//! Keyboard stand-in for the AR tracker (desktop build).
//!
//! - `G`: toggle gun marker visibility
//! - `T`: toggle table marker visibility
//! - `R`: reload every gun
//!
//! Markers start out of view, as they would before the camera sees them.

use bevy::prelude::*;

use crate::common::state::GameplaySet;
use crate::plugins::gun::Gun;
use crate::plugins::tracking::{GunMarker, TableMarker, TrackingChanged, TrackingStatus};

/// What the simulated tracker currently sees.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulatedTracking {
    pub gun_visible: bool,
    pub table_visible: bool,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<SimulatedTracking>().add_systems(
        Update,
        keyboard_tracking
            .in_set(GameplaySet::Input)
            .before(crate::plugins::tracking::systems::apply_tracking),
    );
}

#[inline]
fn status(visible: bool) -> TrackingStatus {
    if visible {
        TrackingStatus::Found
    } else {
        TrackingStatus::Lost
    }
}

pub fn keyboard_tracking(
    time: Res<Time>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut sim: ResMut<SimulatedTracking>,
    gun_markers: Query<Entity, With<GunMarker>>,
    table_markers: Query<Entity, With<TableMarker>>,
    mut guns: Query<&mut Gun>,
    mut tracking: MessageWriter<TrackingChanged>,
) {
    let Some(keys) = keys else {
        return;
    };

    if keys.just_pressed(KeyCode::KeyG) {
        sim.gun_visible = !sim.gun_visible;
        let status = status(sim.gun_visible);
        tracking.write_batch(
            gun_markers
                .iter()
                .map(|target| TrackingChanged { target, status }),
        );
    }

    if keys.just_pressed(KeyCode::KeyT) {
        sim.table_visible = !sim.table_visible;
        let status = status(sim.table_visible);
        tracking.write_batch(
            table_markers
                .iter()
                .map(|target| TrackingChanged { target, status }),
        );
    }

    if keys.just_pressed(KeyCode::KeyR) {
        let now = time.elapsed();
        for mut gun in &mut guns {
            gun.reload(now);
        }
    }
}
