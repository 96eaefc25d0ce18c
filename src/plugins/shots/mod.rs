//! Shots: aiming, hit reaction, vanish animation and the vanish return path.
//!
//! A shot has two independent ways back into its gun's pool:
//! - the gun's lifetime expiry (`gun::systems::run_gun_tasks`)
//! - the end of the vanish animation after a hit (`reclaim_vanished_shots`)
//!
//! Both go through the pool, which accepts only the first. The vanish path releases
//! by lease, so a report that lands after the shot was fired again is dropped.

use avian3d::prelude::CollisionStart;
use bevy::prelude::*;

use crate::common::state::{round_in_progress, GameplaySet};
use crate::plugins::pool::{self, Lease};

mod components;
pub mod systems;

pub use components::*;

/// Written when a shot's vanish animation completes, for the use it was fired in.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShotVanished {
    pub shot: Entity,
    pub lease: Lease,
}

pub fn plugin(app: &mut App) {
    pool::plugin::<ShotFactory>(app);

    app.add_message::<ShotVanished>()
        // Avian registers this itself; headless builds without the physics engine
        // still need the buffer so injected contacts can be read.
        .add_message::<CollisionStart>();

    app.add_systems(
        Update,
        systems::animate_vanishing_shots.in_set(GameplaySet::Tick),
    )
    .add_systems(
        Update,
        systems::reclaim_vanished_shots.in_set(GameplaySet::Reclaim),
    )
    .add_systems(
        PostUpdate,
        systems::resolve_shot_collisions.run_if(round_in_progress),
    );
}

#[cfg(test)]
mod tests;
