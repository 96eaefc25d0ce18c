//! Feature plugins.

use bevy::prelude::*;

pub mod core;
pub mod gun;
pub mod input;
pub mod physics;
pub mod plates;
pub mod pool;
pub mod scene;
pub mod session;
pub mod shots;
pub mod spawner;
pub mod tracking;

// Render-only
pub mod camera;
pub mod lighting;
pub mod visuals;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    session::plugin(app);
    gun::plugin(app);
    shots::plugin(app);
    plates::plugin(app);
    spawner::plugin(app);
    tracking::plugin(app);
    input::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
    visuals::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    physics::plugin(app);
    scene::plugin(app);
    register_render(app);
}
