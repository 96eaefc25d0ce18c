use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::rng::GameRng;
use crate::common::tasks::secs;
use crate::plugins::plates::{Plate, PlateFactory};
use crate::plugins::pool::{ObjectPool, PoolState};

use super::{
    launch_impulse, LaunchImpulse, PlateSpawned, PlateSpawner, SpawnPlane, SpawnerAction,
};

/// Boundary check + delayed auto start for spawners entering the world.
pub fn arm_new_spawners(time: Res<Time>, mut q: Query<(Entity, &mut PlateSpawner), Added<PlateSpawner>>) {
    for (e, mut spawner) in &mut q {
        spawner.config().validate();
        if let Some(delay) = spawner.config().start_delay {
            spawner.start_spawning_after(time.elapsed(), secs(delay));
            debug!("spawner {e:?}: starts in {delay}s");
        }
    }
}

/// Drive spawn loops and distance watchdogs.
pub fn run_spawners(
    mut commands: Commands,
    time: Res<Time>,
    mut rng: ResMut<GameRng>,
    mut spawners: Query<(
        Entity,
        &GlobalTransform,
        &mut PlateSpawner,
        &mut ObjectPool<PlateFactory>,
    )>,
    q_plates: Query<&Transform, With<Plate>>,
    mut spawned: MessageWriter<PlateSpawned>,
) {
    let now = time.elapsed();

    for (spawner_e, gtf, mut spawner, mut pool) in &mut spawners {
        for action in spawner.poll(now, &mut rng) {
            match action {
                SpawnerAction::Spawn => {
                    let plane = SpawnPlane::from_transform(gtf);
                    let cfg = spawner.config();
                    let pos = plane.random_point(cfg.region_width, cfg.region_height, &mut rng);
                    let launch = launch_impulse(plane.normal, cfg, &mut rng);

                    // Acquire leaves the plate at rest; the launch lands next frame.
                    let plate = pool.acquire(&mut commands, spawner_e);
                    commands
                        .entity(plate)
                        .insert((Transform::from_translation(pos), launch));
                    spawner.watch(plate, now);

                    debug!("spawner {spawner_e:?}: launched {plate:?} at {pos}");
                    spawned.write(PlateSpawned {
                        spawner: spawner_e,
                        plate,
                    });
                }
                SpawnerAction::CheckDistance(plate) => {
                    // Burned and reclaimed already: nothing left to watch.
                    if !pool.is_active(plate) {
                        continue;
                    }
                    let Ok(tf) = q_plates.get(plate) else {
                        continue;
                    };

                    if spawner.is_too_far(gtf.translation(), tf.translation) {
                        pool.release(&mut commands, plate);
                        debug!("spawner {spawner_e:?}: {plate:?} out of range, returned");
                    } else {
                        spawner.recheck(plate, now);
                    }
                }
            }
        }
    }
}

/// Kick launched plates through their physics body, once.
///
/// Only matches bodies the physics engine has set up; a plate parked again before
/// that drops its launch.
pub fn apply_launch_impulses(
    mut commands: Commands,
    mut q: Query<(Entity, &LaunchImpulse, &PoolState, Forces)>,
) {
    for (e, launch, state, mut forces) in &mut q {
        if *state == PoolState::Active {
            forces.apply_linear_impulse(launch.linear);
            forces.apply_angular_impulse(launch.angular);
        }
        commands.entity(e).remove::<LaunchImpulse>();
    }
}
