//! Gun: ammo, shooting cadence and the reload cycle.
//!
//! Pipeline (Update):
//! - `arm_new_guns`: validate config, optional auto start
//! - `update_sight`: aim from the current world transform
//! - `run_gun_tasks`: due trigger pulls pull shots from the gun's own pool,
//!   due expiries hand shots back
//!
//! The gun entity carries its `ObjectPool<ShotFactory>`; the shots plugin owns
//! the other return path (vanish after a hit).

use bevy::prelude::*;

use crate::common::state::GameplaySet;

mod components;
mod messages;
pub mod systems;

pub use components::*;
pub use messages::*;

pub fn plugin(app: &mut App) {
    app.add_message::<ShotTriggered>()
        .add_message::<OutOfAmmo>()
        .add_message::<Reloaded>();

    app.add_systems(
        Update,
        (systems::arm_new_guns, systems::update_sight)
            .chain()
            .in_set(GameplaySet::Control),
    )
    .add_systems(Update, systems::run_gun_tasks.in_set(GameplaySet::Tick));
}

#[cfg(test)]
mod tests;
