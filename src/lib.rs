//! Tabletop AR shooting game core.
//!
//! - `common`: layers, game state, the task scheduler, RNG and tunables
//! - `plugins`: one Bevy plugin per feature (pool, gun, shots, plates, spawner, ...)
//! - `game`: full and headless app configuration
//!
//! The `tests/` crates build on `game::configure_headless`.

pub mod common;
pub mod game;
pub mod plugins;
