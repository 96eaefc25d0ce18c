//! Global state machine.
//!
//! ```text
//! AwaitingTable --(table marker found)--> Playing --(round clock runs out)--> RoundOver
//! ```

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    AwaitingTable,
    Playing,
    RoundOver,
}

/// Frame phases of the gameplay core, chained in this order inside `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// External collaborators: tracking events, keyboard.
    Input,
    /// Controller state changes and per-frame derived state (sight).
    Control,
    /// Timed task continuations.
    Tick,
    /// Hand finished instances back to their pools.
    Reclaim,
}

/// Gameplay runs until the round is over. Worlds without states always run.
pub fn round_in_progress(state: Option<Res<State<GameState>>>) -> bool {
    state.is_none_or(|s| *s.get() != GameState::RoundOver)
}
