//! Physics engine (full build only).
//!
//! Gameplay never steps physics itself: it writes velocities and collision layers and
//! reads `CollisionStart`. Headless builds leave the engine out and inject contacts.

use avian3d::prelude::*;
use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    app.add_plugins(PhysicsPlugins::default());
    app.insert_resource(Gravity(Vec3::NEG_Y * 9.81));
}
