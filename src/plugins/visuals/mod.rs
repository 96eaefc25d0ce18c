//! Render-only dressing for gameplay entities.
//!
//! Gameplay entities spawn without meshes; this plugin attaches them when they
//! appear, maps plate burn progress onto the plate material and the gun's remaining
//! ammo onto the gun material.

use bevy::color::palettes::css;
use bevy::prelude::*;

use crate::plugins::gun::{Gun, Reloaded, ShotTriggered, Sight};
use crate::plugins::plates::{Plate, BURNED, UNBURNED};
use crate::plugins::scene::Table;
use crate::plugins::shots::Shot;
use crate::plugins::spawner::{PlateSpawner, SpawnPlane};

const PLATE_COLOR: Color = Color::srgb(0.95, 0.45, 0.15);
const BURNT_COLOR: Color = Color::srgb(0.08, 0.05, 0.04);
pub const FULL_GUN_COLOR: Color = Color::srgb(0.25, 0.75, 0.35);
pub const EMPTY_GUN_COLOR: Color = Color::srgb(0.8, 0.12, 0.1);

pub fn plugin(app: &mut App) {
    app.add_systems(
        PostUpdate,
        (
            dress_table,
            dress_guns,
            dress_shots,
            dress_plates,
            tint_burning_plates,
            tint_guns_by_ammo,
        ),
    )
    .add_systems(Update, (draw_sights, draw_spawn_areas));
}

fn dress_table(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    q: Query<(Entity, &Table), Added<Table>>,
) {
    for (e, table) in &q {
        commands.entity(e).insert((
            Mesh3d(meshes.add(Cuboid::new(
                2.0 * table.half_extents.x,
                0.02,
                2.0 * table.half_extents.y,
            ))),
            MeshMaterial3d(materials.add(Color::srgb(0.25, 0.18, 0.12))),
        ));
    }
}

fn dress_guns(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    q: Query<(Entity, &Gun), Added<Gun>>,
) {
    for (e, gun) in &q {
        commands.entity(e).insert((
            Mesh3d(meshes.add(Capsule3d::new(0.04, 0.2))),
            MeshMaterial3d(materials.add(ammo_color(gun.current_ammo(), gun.max_ammo()))),
        ));
    }
}

/// Gun tint for `current` of `max` rounds: full color on a full magazine, fading
/// linearly to the empty color. A gun without a magazine shows empty.
pub fn ammo_color(current: u32, max: u32) -> Color {
    if max == 0 {
        return EMPTY_GUN_COLOR;
    }
    let t = current.min(max) as f32 / max as f32;
    EMPTY_GUN_COLOR.mix(&FULL_GUN_COLOR, t)
}

/// Retint a gun each time it fires or reloads.
pub fn tint_guns_by_ammo(
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut fired: MessageReader<ShotTriggered>,
    mut reloaded: MessageReader<Reloaded>,
    q: Query<(&Gun, &MeshMaterial3d<StandardMaterial>)>,
) {
    let guns = fired
        .read()
        .map(|ev| ev.gun)
        .chain(reloaded.read().map(|ev| ev.gun));

    for e in guns {
        let Ok((gun, handle)) = q.get(e) else {
            continue;
        };
        if let Some(mat) = materials.get_mut(&handle.0) {
            mat.base_color = ammo_color(gun.current_ammo(), gun.max_ammo());
        }
    }
}

fn dress_shots(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    q: Query<(Entity, &Shot), Without<Mesh3d>>,
) {
    for (e, shot) in &q {
        commands.entity(e).insert((
            Mesh3d(meshes.add(Sphere::new(shot.config().radius))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(1.0, 0.85, 0.3),
                emissive: LinearRgba::rgb(2.0, 1.6, 0.4),
                ..default()
            })),
        ));
    }
}

/// Pooled instances are built in batches; dress whatever has no mesh yet.
/// Each plate gets its own material so burns tint independently.
fn dress_plates(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    q: Query<(Entity, &Plate), Without<Mesh3d>>,
) {
    for (e, plate) in &q {
        let cfg = plate.config();
        commands.entity(e).insert((
            Mesh3d(meshes.add(Cylinder::new(cfg.radius, cfg.thickness))),
            MeshMaterial3d(materials.add(PLATE_COLOR)),
        ));
    }
}

fn tint_burning_plates(
    mut materials: ResMut<Assets<StandardMaterial>>,
    q: Query<(&Plate, &MeshMaterial3d<StandardMaterial>), Changed<Plate>>,
) {
    for (plate, handle) in &q {
        let Some(mat) = materials.get_mut(&handle.0) else {
            continue;
        };
        let t = (plate.burn_progress() - UNBURNED) / (BURNED - UNBURNED);
        mat.base_color = PLATE_COLOR.mix(&BURNT_COLOR, t);
    }
}

fn draw_sights(mut gizmos: Gizmos, q: Query<&Sight>) {
    for sight in &q {
        gizmos.line(sight.origin, sight.end(), css::RED);
    }
}

fn draw_spawn_areas(mut gizmos: Gizmos, q: Query<(&GlobalTransform, &PlateSpawner)>) {
    for (gtf, spawner) in &q {
        let cfg = spawner.config();
        let plane = SpawnPlane::from_transform(gtf);
        let [a, b, c, d] = plane.corners(cfg.region_width, cfg.region_height);

        gizmos.linestrip([a, b, c, d, a], css::RED);
        gizmos.line(
            plane.center,
            plane.center + plane.normal * cfg.height_to_point,
            css::RED,
        );
    }
}
