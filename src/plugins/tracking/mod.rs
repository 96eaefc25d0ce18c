//! AR tracking adapter: `TrackingChanged` messages from the tracker drive guns and
//! spawners through their markers.
//!
//! The desktop build feeds this from the keyboard (see `plugins::input`).

use bevy::prelude::*;

use crate::common::state::{GameState, GameplaySet};

mod components;
pub mod systems;

pub use components::*;

/// Raised by the external tracker whenever a marker appears or disappears.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackingChanged {
    pub target: Entity,
    pub status: TrackingStatus,
}

pub fn plugin(app: &mut App) {
    app.add_message::<TrackingChanged>()
        .add_systems(
            Update,
            (systems::validate_markers, systems::apply_tracking)
                .chain()
                .in_set(GameplaySet::Input),
        )
        .add_systems(
            Update,
            systems::start_game_on_table_found
                .in_set(GameplaySet::Input)
                .run_if(in_state(GameState::AwaitingTable)),
        )
        .add_systems(Update, systems::tick_gun_markers.in_set(GameplaySet::Tick));
}
