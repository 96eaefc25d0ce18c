use std::time::Duration;

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::{active_plate_layers, Layer};
use crate::common::test_utils::{
    advance_time, drain_messages, init_time, now, run_system_once, with_commands,
};
use crate::plugins::plates::{Plate, PlateConfig};
use crate::plugins::pool::{Lease, ObjectPool, PoolState, Pooled};
use crate::plugins::session::GameSession;

use super::systems::{animate_vanishing_shots, reclaim_vanished_shots, resolve_shot_collisions};
use super::{Shot, ShotConfig, ShotFactory, ShotVanished, VanishStep};

fn world() -> World {
    let mut world = World::new();
    init_time(&mut world);
    world.init_resource::<Messages<CollisionStart>>();
    world.init_resource::<Messages<ShotVanished>>();
    world.init_resource::<GameSession>();
    world
}

fn write_collision(world: &mut World, a: Entity, b: Entity) {
    world.write_message(CollisionStart {
        collider1: a,
        collider2: b,
        body1: None,
        body2: None,
    });
}

fn active_shot(world: &mut World) -> Entity {
    world
        .spawn((
            Shot::new(ShotConfig::default()),
            Transform::default(),
            PoolState::Active,
            Pooled {
                pool: Entity::PLACEHOLDER,
                lease: Lease(1),
            },
        ))
        .id()
}

#[test]
fn launch_state_faces_direction_without_gravity() {
    let (tf, lin, ang, gravity) = super::launch_state(Vec3::ONE, Vec3::new(0.0, 0.0, -2.0), 10.0);

    assert_eq!(tf.translation, Vec3::ONE);
    assert!(tf.forward().dot(Vec3::NEG_Z) > 0.999);
    assert!((lin.0 - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-5);
    assert_eq!(ang.0, Vec3::ZERO);
    assert_eq!(gravity.0, 0.0);
}

#[test]
fn vanish_starts_once_and_shrinks_linearly() {
    let mut shot = Shot::new(ShotConfig {
        time_to_disappear: 1.0,
        ..default()
    });
    let t0 = Duration::from_secs(5);

    assert!(shot.begin_vanish(t0, Vec3::splat(2.0)));
    assert!(!shot.begin_vanish(t0 + Duration::from_millis(100), Vec3::ONE));
    assert!(shot.is_vanishing());

    match shot.poll(t0 + Duration::from_millis(500)) {
        Some(VanishStep::Shrinking(s)) => assert!((s - Vec3::ONE).length() < 1e-5),
        other => panic!("expected shrinking, got {other:?}"),
    }

    assert_eq!(shot.poll(t0 + Duration::from_secs(1)), Some(VanishStep::Gone));
    assert!(!shot.is_vanishing());
    // Nothing left to resume.
    assert_eq!(shot.poll(t0 + Duration::from_secs(2)), None);
}

#[test]
fn idle_shot_has_nothing_to_poll() {
    let mut shot = Shot::new(ShotConfig::default());
    assert_eq!(shot.poll(Duration::from_secs(1)), None);
}

#[test]
fn hitting_a_plate_burns_it_counts_a_hit_and_starts_vanish() {
    let mut world = world();
    let shot = active_shot(&mut world);
    let plate = world
        .spawn((Plate::new(PlateConfig::default()), active_plate_layers()))
        .id();

    write_collision(&mut world, plate, shot);
    run_system_once(&mut world, resolve_shot_collisions);

    assert!(world.get::<Shot>(shot).unwrap().is_vanishing());
    assert!(world.get::<Plate>(plate).unwrap().is_burning());
    assert_eq!(world.resource::<GameSession>().hits(), 1);
}

#[test]
fn hitting_the_table_only_vanishes() {
    let mut world = world();
    let shot = active_shot(&mut world);
    let table = world
        .spawn(CollisionLayers::new(Layer::Table, [Layer::Shot]))
        .id();

    write_collision(&mut world, shot, table);
    run_system_once(&mut world, resolve_shot_collisions);

    assert!(world.get::<Shot>(shot).unwrap().is_vanishing());
    assert_eq!(world.resource::<GameSession>().hits(), 0);
}

#[test]
fn parked_shots_ignore_contacts() {
    let mut world = world();
    let shot = active_shot(&mut world);
    world.entity_mut(shot).insert(PoolState::Inactive);
    let table = world.spawn_empty().id();

    write_collision(&mut world, shot, table);
    run_system_once(&mut world, resolve_shot_collisions);

    assert!(!world.get::<Shot>(shot).unwrap().is_vanishing());
}

#[test]
fn second_contact_does_not_restart_vanish_but_still_counts() {
    let mut world = world();
    let shot = active_shot(&mut world);
    let plate = world
        .spawn((Plate::new(PlateConfig::default()), active_plate_layers()))
        .id();

    write_collision(&mut world, shot, plate);
    run_system_once(&mut world, resolve_shot_collisions);
    drain_messages::<CollisionStart>(&mut world);

    advance_time(&mut world, Duration::from_millis(400));
    write_collision(&mut world, shot, plate);
    run_system_once(&mut world, resolve_shot_collisions);

    assert_eq!(world.resource::<GameSession>().hits(), 2);

    // Still on the first animation: done 1s after the first contact.
    advance_time(&mut world, Duration::from_millis(600));
    run_system_once(&mut world, animate_vanishing_shots);
    let gone = drain_messages::<ShotVanished>(&mut world);
    assert_eq!(
        gone,
        vec![ShotVanished {
            shot,
            lease: Lease(1)
        }]
    );
}

#[test]
fn vanish_animation_scales_transform_then_reports() {
    let mut world = world();
    let shot = active_shot(&mut world);
    let t0 = now(&world);
    world
        .get_mut::<Shot>(shot)
        .unwrap()
        .begin_vanish(t0, Vec3::ONE);

    advance_time(&mut world, Duration::from_millis(250));
    run_system_once(&mut world, animate_vanishing_shots);
    let scale = world.get::<Transform>(shot).unwrap().scale;
    assert!((scale - Vec3::splat(0.75)).length() < 1e-5);
    assert!(drain_messages::<ShotVanished>(&mut world).is_empty());

    advance_time(&mut world, Duration::from_millis(750));
    run_system_once(&mut world, animate_vanishing_shots);
    assert_eq!(world.get::<Transform>(shot).unwrap().scale, Vec3::ZERO);
    assert_eq!(drain_messages::<ShotVanished>(&mut world).len(), 1);
}

fn pooled_shot(world: &mut World) -> (Entity, Entity) {
    let gun = world.spawn_empty().id();
    let mut pool = ObjectPool::new(ShotFactory::default(), 1);
    with_commands(world, |c| pool.prepopulate(c, gun));
    let shot = with_commands(world, |c| pool.acquire(c, gun));
    world.entity_mut(gun).insert(pool);
    (gun, shot)
}

fn lease_of(world: &World, shot: Entity) -> Lease {
    world.get::<Pooled>(shot).unwrap().lease
}

fn acquire_from_gun(world: &mut World, gun: Entity) -> Option<Entity> {
    run_system_once(
        world,
        move |mut commands: Commands, mut pools: Query<&mut ObjectPool<ShotFactory>>| {
            pools
                .get_mut(gun)
                .map(|mut pool| pool.acquire(&mut commands, gun))
                .ok()
        },
    )
}

fn release_from_gun(world: &mut World, gun: Entity, shot: Entity) -> bool {
    run_system_once(
        world,
        move |mut commands: Commands, mut pools: Query<&mut ObjectPool<ShotFactory>>| {
            pools
                .get_mut(gun)
                .is_ok_and(|mut pool| pool.release(&mut commands, shot))
        },
    )
}

#[test]
fn vanish_then_lifetime_expiry_releases_once() {
    let mut world = world();
    let (gun, shot) = pooled_shot(&mut world);
    let lease = lease_of(&world, shot);

    world.write_message(ShotVanished { shot, lease });
    run_system_once(&mut world, reclaim_vanished_shots);

    assert_eq!(world.get::<PoolState>(shot), Some(&PoolState::Inactive));
    assert!(!release_from_gun(&mut world, gun, shot));

    let pool = world.get::<ObjectPool<ShotFactory>>(gun).unwrap();
    assert_eq!(pool.free_len(), 1);
    assert_eq!(pool.active_len(), 0);
}

#[test]
fn lifetime_expiry_then_vanish_releases_once() {
    let mut world = world();
    let (gun, shot) = pooled_shot(&mut world);
    let lease = lease_of(&world, shot);

    assert!(release_from_gun(&mut world, gun, shot));

    world.write_message(ShotVanished { shot, lease });
    run_system_once(&mut world, reclaim_vanished_shots);

    let pool = world.get::<ObjectPool<ShotFactory>>(gun).unwrap();
    assert_eq!(pool.free_len(), 1);
    assert_eq!(pool.active_len(), 0);
    assert_eq!(world.get::<Visibility>(shot), Some(&Visibility::Hidden));
}

#[test]
fn late_vanish_report_leaves_the_refired_shot_alone() {
    let mut world = world();
    let (gun, shot) = pooled_shot(&mut world);
    let first_use = lease_of(&world, shot);

    // Expired and handed straight back out (LIFO) before the vanish report is read.
    assert!(release_from_gun(&mut world, gun, shot));
    assert_eq!(acquire_from_gun(&mut world, gun), Some(shot));
    assert_ne!(lease_of(&world, shot), first_use);

    world.write_message(ShotVanished {
        shot,
        lease: first_use,
    });
    run_system_once(&mut world, reclaim_vanished_shots);

    assert_eq!(world.get::<PoolState>(shot), Some(&PoolState::Active));
    let pool = world.get::<ObjectPool<ShotFactory>>(gun).unwrap();
    assert!(pool.is_active(shot));
    assert_eq!(pool.free_len(), 0);
}

#[test]
fn fire_aims_an_acquired_shot() {
    let mut world = world();
    let (_, shot) = pooled_shot(&mut world);
    let config = ShotConfig {
        speed: 4.0,
        ..default()
    };

    with_commands(&mut world, |c| {
        super::fire(&mut c.entity(shot), Vec3::new(1.0, 2.0, 3.0), Vec3::X, &config)
    });

    let e = world.entity(shot);
    assert_eq!(e.get::<Shot>().unwrap().direction(), Vec3::X);
    assert_eq!(e.get::<Transform>().unwrap().translation, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(e.get::<LinearVelocity>().unwrap().0, Vec3::new(4.0, 0.0, 0.0));
    assert_eq!(e.get::<GravityScale>().unwrap().0, 0.0);
    assert_eq!(e.get::<CollisionLayers>(), Some(&crate::common::layers::active_shot_layers()));
}
