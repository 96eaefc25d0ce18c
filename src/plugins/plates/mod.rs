//! Plates: the targets. A hit starts a burn; a finished burn sends the plate home.
//!
//! Plates are owned by the spawner pools (`ObjectPool<PlateFactory>` on each spawner).
//! The distance watchdog in the spawner is the other way back into the pool.

use bevy::prelude::*;

use crate::common::state::GameplaySet;
use crate::plugins::pool::{self, Lease};

mod components;
pub mod systems;

pub use components::*;

/// Written once per burn, when the plate has fully burned.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlateGone {
    pub plate: Entity,
    pub lease: Lease,
}

pub fn plugin(app: &mut App) {
    pool::plugin::<PlateFactory>(app);

    app.add_message::<PlateGone>()
        .add_systems(Update, systems::advance_plate_burn.in_set(GameplaySet::Tick))
        .add_systems(
            Update,
            systems::reclaim_gone_plates.in_set(GameplaySet::Reclaim),
        );
}
