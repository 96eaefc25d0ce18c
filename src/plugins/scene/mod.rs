//! Demo scene: a table with a plate spawner, and a gun on its own marker.
//!
//! ```text
//!           gun marker ── Gun (+ shot pool)
//!               │  aims along local up
//!               v
//!  ═══════════ table marker ══════════  (static collider, Table layer)
//!                   └── PlateSpawner (+ plate pool), normal = world up
//! ```
//!
//! Markers are plain entities here; the tracker (keyboard in the desktop build)
//! only raises `TrackingChanged` for them.

use std::f32::consts::FRAC_PI_2;

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::tunables::Tunables;
use crate::plugins::gun::Gun;
use crate::plugins::plates::PlateFactory;
use crate::plugins::pool::ObjectPool;
use crate::plugins::shots::ShotFactory;
use crate::plugins::spawner::PlateSpawner;
use crate::plugins::tracking::{GunMarker, TableMarker};

/// Static playing surface.
#[derive(Component, Debug, Clone, Copy)]
pub struct Table {
    pub half_extents: Vec2,
}

/// Handles to the demo entities.
#[derive(Resource, Debug, Clone, Copy)]
pub struct DemoScene {
    pub table: Entity,
    pub spawner: Entity,
    pub gun_marker: Entity,
    pub gun: Entity,
}

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_demo_scene);
}

fn spawn_demo_scene(mut commands: Commands, tunables: Res<Tunables>) {
    let half = Vec2::splat(1.5);

    let spawner = commands
        .spawn((
            Name::new("PlateSpawner"),
            PlateSpawner::new(tunables.spawner.clone()),
            ObjectPool::new(
                PlateFactory::new(tunables.plate.clone()),
                tunables.plate_pool_size,
            ),
            Transform::from_xyz(0.0, 0.05, 0.0),
        ))
        .id();

    let table = commands
        .spawn((
            Name::new("TableMarker"),
            Table { half_extents: half },
            TableMarker { spawner },
            Transform::default(),
            RigidBody::Static,
            Collider::cuboid(2.0 * half.x, 0.02, 2.0 * half.y),
            CollisionLayers::new(Layer::Table, [Layer::Shot, Layer::Plate]),
        ))
        .id();

    let gun = commands
        .spawn((
            Name::new("Gun"),
            Gun::new(tunables.gun.clone()),
            ObjectPool::new(
                ShotFactory::new(tunables.shot.clone()),
                tunables.shot_pool_size,
            ),
            // Held at the player's side of the table, barrel (local up) toward the table.
            Transform::from_xyz(0.0, 0.6, 2.5).with_rotation(Quat::from_rotation_x(-FRAC_PI_2 * 1.2)),
        ))
        .id();

    let gun_marker = commands
        .spawn((
            Name::new("GunMarker"),
            GunMarker::new(gun, tunables.gun_marker.clone()),
            Transform::default(),
        ))
        .id();

    commands.insert_resource(DemoScene {
        table,
        spawner,
        gun_marker,
        gun,
    });
}
