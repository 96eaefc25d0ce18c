use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::gun::Gun;
use crate::plugins::spawner::PlateSpawner;

use super::{GunMarker, TableMarker, TrackingChanged, TrackingStatus};

/// Markers must point at live collaborators of the right kind.
pub fn validate_markers(
    gun_markers: Query<(Entity, &GunMarker), Added<GunMarker>>,
    table_markers: Query<(Entity, &TableMarker), Added<TableMarker>>,
    guns: Query<(), With<Gun>>,
    spawners: Query<(), With<PlateSpawner>>,
) {
    for (e, marker) in &gun_markers {
        marker.config().validate();
        assert!(
            guns.contains(marker.gun()),
            "gun marker {e:?} is linked to {:?}, which has no Gun",
            marker.gun()
        );
    }
    for (e, marker) in &table_markers {
        assert!(
            spawners.contains(marker.spawner),
            "table marker {e:?} is linked to {:?}, which has no PlateSpawner",
            marker.spawner
        );
    }
}

/// Map tracking changes onto the linked gun or spawner.
pub fn apply_tracking(
    time: Res<Time>,
    mut reader: MessageReader<TrackingChanged>,
    mut gun_markers: Query<&mut GunMarker>,
    table_markers: Query<&TableMarker>,
    mut guns: Query<&mut Gun>,
    mut spawners: Query<&mut PlateSpawner>,
) {
    let now = time.elapsed();

    for ev in reader.read() {
        if let Ok(mut marker) = gun_markers.get_mut(ev.target) {
            let Ok(mut gun) = guns.get_mut(marker.gun()) else {
                warn!("gun marker {:?}: linked gun is gone", ev.target);
                continue;
            };
            match ev.status {
                TrackingStatus::Lost => {
                    marker.on_lost(now);
                    gun.stop_shooting();
                }
                TrackingStatus::Found => {
                    gun.start_shooting(now);
                    if marker.on_found() {
                        gun.reload(now);
                    }
                }
            }
        } else if let Ok(marker) = table_markers.get(ev.target) {
            let Ok(mut spawner) = spawners.get_mut(marker.spawner) else {
                warn!("table marker {:?}: linked spawner is gone", ev.target);
                continue;
            };
            match ev.status {
                TrackingStatus::Found => spawner.start_spawning(now),
                TrackingStatus::Lost => spawner.stop_spawning(),
            };
        } else {
            warn!("tracking {:?} for {:?}, which is not a marker", ev.status, ev.target);
        }
    }
}

pub fn tick_gun_markers(time: Res<Time>, mut q: Query<&mut GunMarker>) {
    let now = time.elapsed();
    for mut marker in &mut q {
        marker.poll(now);
    }
}

/// The first table detection starts the game.
pub fn start_game_on_table_found(
    mut reader: MessageReader<TrackingChanged>,
    tables: Query<(), With<TableMarker>>,
    mut next: ResMut<NextState<GameState>>,
) {
    let found = reader
        .read()
        .any(|ev| ev.status == TrackingStatus::Found && tables.contains(ev.target));
    if found {
        info!("table found, starting game");
        next.set(GameState::Playing);
    }
}
