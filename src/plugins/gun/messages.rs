//! Gun notifications.
//!
//! Every reader system is one subscriber; several may read the same stream.

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShotTriggered {
    pub gun: Entity,
    pub shot: Entity,
}

/// Written once, by the shot that empties the magazine.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfAmmo {
    pub gun: Entity,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reloaded {
    pub gun: Entity,
}
