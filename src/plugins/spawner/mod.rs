//! Plate spawner: launches plates from a rectangular region on a timer and takes
//! back the ones that stray too far.
//!
//! Each spawner entity owns its `ObjectPool<PlateFactory>`.

use bevy::prelude::*;

use crate::common::state::GameplaySet;

mod components;
pub mod systems;

pub use components::*;

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlateSpawned {
    pub spawner: Entity,
    pub plate: Entity,
}

pub fn plugin(app: &mut App) {
    app.add_message::<PlateSpawned>()
        .add_systems(
            Update,
            (systems::arm_new_spawners, systems::apply_launch_impulses)
                .in_set(GameplaySet::Control),
        )
        .add_systems(Update, systems::run_spawners.in_set(GameplaySet::Tick));
}
