//! Camera plugin (render-only).
//!
//! Stands where the AR device would be: behind the gun, looking down at the table.

use bevy::prelude::*;

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera);
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        MainCamera,
        Camera3d::default(),
        Transform::from_xyz(0.0, 2.2, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
