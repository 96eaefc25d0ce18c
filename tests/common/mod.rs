//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `ar_shooter::game::configure_headless` to install gameplay plugins.
//!
//! Time advances by a fixed 100ms per update so timed behavior is reproducible.
//! The very first update reports a zero delta.

#![allow(dead_code)]

use std::time::Duration;

use ar_shooter::common::rng::GameRng;
use ar_shooter::common::tunables::Tunables;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

pub const STEP: Duration = Duration::from_millis(100);

pub fn app_headless() -> App {
    app_with(Tunables::default())
}

pub fn app_with(tunables: Tunables) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));

    // Installed before the core plugin so it keeps them.
    app.insert_resource(tunables);
    app.insert_resource(GameRng::seeded(0xA5));

    ar_shooter::game::configure_headless(&mut app);
    app
}

/// Run `n` updates.
pub fn step(app: &mut App, n: usize) {
    for _ in 0..n {
        app.update();
    }
}

/// Everything of type `M` written since the last call.
pub fn drain<M: Message>(app: &mut App) -> Vec<M> {
    app.world_mut().resource_mut::<Messages<M>>().drain().collect()
}
