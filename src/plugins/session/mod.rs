//! Session counters and the round clock.

use bevy::prelude::*;

use crate::common::state::{GameState, GameplaySet};
use crate::common::tunables::Tunables;

mod components;
pub mod systems;

pub use components::*;

/// Final tally, written once when the round clock runs out.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundEnded {
    pub hits: u32,
    pub shots_fired: u32,
}

pub fn plugin(app: &mut App) {
    let round = app
        .world()
        .get_resource::<Tunables>()
        .map(|t| t.round.clone())
        .unwrap_or_default();

    app.init_resource::<GameSession>()
        .insert_resource(RoundClock::new(round))
        .add_message::<RoundEnded>()
        .add_systems(OnEnter(GameState::Playing), systems::begin_round)
        .add_systems(
            Update,
            systems::tick_round_clock
                .in_set(GameplaySet::Tick)
                .run_if(in_state(GameState::Playing)),
        )
        .add_systems(OnEnter(GameState::RoundOver), systems::halt_gameplay);
}
