use std::time::Duration;

use bevy::prelude::*;

use crate::common::test_utils::{
    advance_time, drain_messages, init_time, run_system_once, with_commands,
};
use crate::plugins::pool::{ObjectPool, PoolState};
use crate::plugins::session::GameSession;
use crate::plugins::shots::ShotFactory;

use super::systems::run_gun_tasks;
use super::*;

const S: Duration = Duration::from_secs(1);

fn config(max_ammo: u32) -> GunConfig {
    GunConfig {
        max_ammo,
        time_between_shots: 1.0,
        reload_time: 2.0,
        shot_lifetime: 0.1,
        ..default()
    }
}

fn fires(actions: &[GunAction]) -> usize {
    actions
        .iter()
        .filter(|a| matches!(a, GunAction::Fire { .. }))
        .count()
}

#[test]
fn start_shooting_is_idempotent() {
    let mut gun = Gun::new(config(5));

    assert!(gun.start_shooting(Duration::ZERO));
    assert!(!gun.start_shooting(Duration::ZERO));
    assert!(gun.is_shooting());

    // One loop only: a single shot at t=0.
    assert_eq!(fires(&gun.poll(Duration::ZERO)), 1);
}

#[test]
fn stop_shooting_on_idle_gun_is_a_no_op() {
    let mut gun = Gun::new(config(5));
    assert!(!gun.stop_shooting());
    assert!(!gun.is_shooting());
    assert_eq!(gun.current_ammo(), 5);
}

#[test]
fn shooting_three_and_a_half_seconds_with_three_rounds() {
    let mut gun = Gun::new(config(3));
    gun.start_shooting(Duration::ZERO);

    let mut fired = 0;
    let mut depleted = 0;
    let mut dry = 0;
    let mut t = Duration::ZERO;
    while t <= Duration::from_millis(3500) {
        for action in gun.poll(t) {
            match action {
                GunAction::Fire { depleted: d } => {
                    fired += 1;
                    depleted += usize::from(d);
                }
                GunAction::DryFire => dry += 1,
                _ => {}
            }
        }
        t += Duration::from_millis(100);
    }

    // Ticks at 0, 1, 2, 3: three shots, then one dry pull.
    assert_eq!(fired, 3);
    assert_eq!(depleted, 1);
    assert_eq!(dry, 1);
    assert_eq!(gun.current_ammo(), 0);
    assert!(gun.is_shooting());
    assert!(!gun.is_reloading());
}

#[test]
fn ammo_never_increases_while_shooting() {
    let mut gun = Gun::new(config(4));
    gun.start_shooting(Duration::ZERO);

    let mut last = gun.current_ammo();
    for i in 0..10 {
        gun.poll(S * i);
        assert!(gun.current_ammo() <= last);
        last = gun.current_ammo();
    }
    assert_eq!(last, 0);
}

#[test]
fn reload_blocks_shooting_then_resumes() {
    let mut gun = Gun::new(config(3));
    gun.start_shooting(Duration::ZERO);
    gun.poll(Duration::ZERO);
    gun.poll(S);
    assert_eq!(gun.current_ammo(), 1);

    assert!(gun.reload(S));
    assert!(gun.is_reloading());
    assert!(!gun.is_shooting());
    assert_eq!(gun.current_ammo(), 3);

    // Refused while reloading, in both directions.
    assert!(!gun.start_shooting(S));
    assert!(!gun.reload(S));

    assert!(gun.poll(S * 2).is_empty());

    let actions = gun.poll(S * 3);
    assert_eq!(actions, vec![GunAction::Reloaded]);
    assert!(!gun.is_reloading());
    assert!(gun.is_shooting());

    // Shooting resumed at the reload instant.
    assert_eq!(fires(&gun.poll(S * 3)), 1);
    assert_eq!(gun.current_ammo(), 2);
}

#[test]
fn reload_on_idle_gun_starts_shooting_afterwards() {
    let mut gun = Gun::new(config(2));
    gun.reload(Duration::ZERO);
    assert_eq!(gun.poll(S * 2), vec![GunAction::Reloaded]);
    assert!(gun.is_shooting());
}

#[test]
fn tracked_shot_expires_after_lifetime() {
    let mut gun = Gun::new(config(2));
    let shot = World::new().spawn_empty().id();
    gun.track_shot(shot, S);

    assert_eq!(gun.shots_in_flight(), 1);
    assert!(gun.poll(S + Duration::from_millis(50)).is_empty());
    assert_eq!(
        gun.poll(S + Duration::from_millis(100)),
        vec![GunAction::ExpireShot(shot)]
    );
    assert_eq!(gun.shots_in_flight(), 0);
}

#[test]
fn sight_follows_the_local_up_axis() {
    let cfg = GunConfig {
        sight_length: 2.0,
        shot_start_offset: Vec3::new(0.0, 0.5, 0.0),
        ..default()
    };
    let tf = Transform::from_xyz(1.0, 0.0, 0.0)
        .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2));
    let sight = Sight::from_transform(&GlobalTransform::from(tf), &cfg);

    // Rotating -90 deg about X turns local up into world -Z.
    assert!((sight.direction - Vec3::NEG_Z).length() < 1e-5);
    assert!((sight.origin - Vec3::new(1.0, 0.0, -0.5)).length() < 1e-5);
    assert!((sight.end() - Vec3::new(1.0, 0.0, -2.5)).length() < 1e-5);
}

#[test]
#[should_panic(expected = "gun misconfigured")]
fn negative_period_is_rejected() {
    GunConfig {
        time_between_shots: -1.0,
        ..default()
    }
    .validate();
}

fn gun_world(max_ammo: u32) -> (World, Entity) {
    let mut world = World::new();
    init_time(&mut world);
    world.init_resource::<GameSession>();
    world.init_resource::<Messages<ShotTriggered>>();
    world.init_resource::<Messages<OutOfAmmo>>();
    world.init_resource::<Messages<Reloaded>>();

    let gun = world.spawn(Gun::new(config(max_ammo))).id();
    let mut pool = ObjectPool::new(ShotFactory::default(), 1);
    with_commands(&mut world, |c| pool.prepopulate(c, gun));
    world.entity_mut(gun).insert(pool);
    (world, gun)
}

#[test]
fn firing_pulls_from_the_pool_and_expiry_returns() {
    let (mut world, gun) = gun_world(2);
    world.get_mut::<Gun>(gun).unwrap().start_shooting(Duration::ZERO);

    run_system_once(&mut world, run_gun_tasks);

    let triggered = drain_messages::<ShotTriggered>(&mut world);
    assert_eq!(triggered.len(), 1);
    let shot = triggered[0].shot;
    assert_eq!(triggered[0].gun, gun);
    assert_eq!(world.get::<PoolState>(shot), Some(&PoolState::Active));
    assert_eq!(world.resource::<GameSession>().shots_fired(), 1);
    assert_eq!(world.resource::<GameSession>().ammo(), 1);

    advance_time(&mut world, Duration::from_millis(100));
    run_system_once(&mut world, run_gun_tasks);

    assert_eq!(world.get::<PoolState>(shot), Some(&PoolState::Inactive));
    let pool = world.get::<ObjectPool<ShotFactory>>(gun).unwrap();
    assert_eq!(pool.active_len(), 0);
    assert_eq!(pool.constructed(), 1);
}

#[test]
fn out_of_ammo_is_written_once() {
    let (mut world, gun) = gun_world(1);
    world.get_mut::<Gun>(gun).unwrap().start_shooting(Duration::ZERO);

    for _ in 0..4 {
        run_system_once(&mut world, run_gun_tasks);
        advance_time(&mut world, S);
    }

    assert_eq!(drain_messages::<ShotTriggered>(&mut world).len(), 1);
    assert_eq!(
        drain_messages::<OutOfAmmo>(&mut world),
        vec![OutOfAmmo { gun }]
    );
}

#[test]
fn reload_completion_is_announced() {
    let (mut world, gun) = gun_world(3);
    world.get_mut::<Gun>(gun).unwrap().reload(Duration::ZERO);

    advance_time(&mut world, S * 2);
    run_system_once(&mut world, run_gun_tasks);

    assert_eq!(drain_messages::<Reloaded>(&mut world), vec![Reloaded { gun }]);
    assert_eq!(world.resource::<GameSession>().ammo(), 3);
}
