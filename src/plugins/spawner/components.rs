use std::time::Duration;

use bevy::prelude::*;

use crate::common::rng::GameRng;
use crate::common::tasks::{random_delay, secs, TaskQueue};

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnerConfig {
    pub region_width: f32,
    pub region_height: f32,
    pub min_launch_force: f32,
    pub max_launch_force: f32,
    /// Plates farther than this from the spawner are taken back.
    pub max_distance_to_spawner: f32,
    pub min_time_between_spawns: f32,
    pub max_time_between_spawns: f32,
    /// Length of the aim line drawn along the spawn normal.
    pub height_to_point: f32,
    pub distance_check_interval: f32,
    /// Seconds after entering the world before spawning starts on its own.
    pub start_delay: Option<f32>,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            region_width: 3.0,
            region_height: 3.0,
            min_launch_force: 1.0,
            max_launch_force: 5.0,
            max_distance_to_spawner: 1.0,
            min_time_between_spawns: 1.0,
            max_time_between_spawns: 3.0,
            height_to_point: 10.0,
            distance_check_interval: 0.2,
            start_delay: Some(3.0),
        }
    }
}

impl SpawnerConfig {
    pub fn validate(&self) {
        assert!(
            self.region_width >= 0.0
                && self.region_height >= 0.0
                && self.max_distance_to_spawner >= 0.0
                && self.distance_check_interval >= 0.0,
            "spawner misconfigured: negative extent or interval: {self:?}"
        );
        assert!(
            0.0 <= self.min_launch_force && self.min_launch_force <= self.max_launch_force,
            "spawner misconfigured: launch force range {}..{}",
            self.min_launch_force,
            self.max_launch_force
        );
        assert!(
            0.0 <= self.min_time_between_spawns
                && self.min_time_between_spawns <= self.max_time_between_spawns,
            "spawner misconfigured: spawn delay range {}..{}",
            self.min_time_between_spawns,
            self.max_time_between_spawns
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnerTask {
    DelayedStart,
    Spawn,
    CheckDistance(Entity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnerAction {
    Spawn,
    CheckDistance(Entity),
}

/// Spawn loop plus one distance watchdog per plate in flight.
///
/// ```text
/// Stopped --start_spawning--> Spawning --stop_spawning--> Stopped
/// ```
///
/// Stopping only ends the spawn loop; watchdogs keep running until their plate
/// leaves or is returned.
#[derive(Component, Debug, Clone)]
#[require(Transform)]
pub struct PlateSpawner {
    config: SpawnerConfig,
    tasks: TaskQueue<SpawnerTask>,
}

impl PlateSpawner {
    pub fn new(config: SpawnerConfig) -> Self {
        Self {
            config,
            tasks: TaskQueue::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    #[inline]
    pub fn is_spawning(&self) -> bool {
        self.tasks.is_scheduled(SpawnerTask::Spawn)
    }

    pub fn is_watching(&self, plate: Entity) -> bool {
        self.tasks.is_scheduled(SpawnerTask::CheckDistance(plate))
    }

    /// When the watchdog for `plate` runs next, if it is being watched.
    pub fn next_distance_check(&self, plate: Entity) -> Option<Duration> {
        self.tasks.deadline(SpawnerTask::CheckDistance(plate))
    }

    /// First plate goes out on the next tick. No-op while spawning.
    pub fn start_spawning(&mut self, now: Duration) -> bool {
        self.tasks.stop(SpawnerTask::DelayedStart);
        if !self.tasks.start(SpawnerTask::Spawn, now) {
            return false;
        }
        info!("spawner: start spawning");
        true
    }

    pub fn start_spawning_after(&mut self, now: Duration, delay: Duration) {
        if !self.is_spawning() {
            self.tasks
                .restart(SpawnerTask::DelayedStart, now.saturating_add(delay));
        }
    }

    /// No-op while stopped. Also cancels a pending delayed start.
    pub fn stop_spawning(&mut self) -> bool {
        self.tasks.stop(SpawnerTask::DelayedStart);
        let stopped = self.tasks.stop(SpawnerTask::Spawn);
        if stopped {
            info!("spawner: stop spawning");
        }
        stopped
    }

    /// Begin polling `plate`'s distance, first check on the next tick.
    pub fn watch(&mut self, plate: Entity, now: Duration) {
        self.tasks.restart(SpawnerTask::CheckDistance(plate), now);
    }

    /// Schedule the next distance poll for `plate`.
    pub fn recheck(&mut self, plate: Entity, now: Duration) {
        self.tasks.restart(
            SpawnerTask::CheckDistance(plate),
            now.saturating_add(secs(self.config.distance_check_interval)),
        );
    }

    #[inline]
    pub fn is_too_far(&self, spawner: Vec3, plate: Vec3) -> bool {
        let max = self.config.max_distance_to_spawner;
        spawner.distance_squared(plate) > max * max
    }

    pub fn poll(&mut self, now: Duration, rng: &mut GameRng) -> Vec<SpawnerAction> {
        let due = self.tasks.drain_due(now);
        let mut actions = Vec::with_capacity(due.len());

        for task in due {
            match task {
                SpawnerTask::DelayedStart => {
                    self.start_spawning(now);
                }
                SpawnerTask::Spawn => {
                    actions.push(SpawnerAction::Spawn);
                    let delay = random_delay(
                        rng,
                        self.config.min_time_between_spawns,
                        self.config.max_time_between_spawns,
                    );
                    self.tasks.start(SpawnerTask::Spawn, now.saturating_add(delay));
                }
                SpawnerTask::CheckDistance(plate) => {
                    actions.push(SpawnerAction::CheckDistance(plate));
                }
            }
        }

        actions
    }
}

/// Local frame of the spawn region, recomputed from the live transform on each use.
///
/// `normal` is the local up axis; `tangent` is the local +Z axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlane {
    pub center: Vec3,
    pub normal: Vec3,
    pub tangent: Vec3,
    pub binormal: Vec3,
}

impl SpawnPlane {
    pub fn from_transform(gtf: &GlobalTransform) -> Self {
        let normal = *gtf.up();
        let tangent = *gtf.back();
        Self {
            center: gtf.translation(),
            normal,
            tangent,
            binormal: normal.cross(tangent),
        }
    }

    #[inline]
    pub fn x(&self) -> Vec3 {
        self.binormal
    }

    #[inline]
    pub fn y(&self) -> Vec3 {
        -self.tangent
    }

    pub fn random_point(&self, width: f32, height: f32, rng: &mut GameRng) -> Vec3 {
        self.center
            + self.x() * rng.symmetric(0.5 * width)
            + self.y() * rng.symmetric(0.5 * height)
    }

    /// Top left, top right, bottom right, bottom left.
    pub fn corners(&self, width: f32, height: f32) -> [Vec3; 4] {
        let hx = 0.5 * width * self.binormal;
        let hy = 0.5 * height * self.tangent;
        [
            self.center - hx - hy,
            self.center + hx - hy,
            self.center + hx + hy,
            self.center - hx + hy,
        ]
    }
}

/// Pending launch of a freshly spawned plate, applied through the physics body once
/// it exists so the plate's own mass and inertia scale the result.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct LaunchImpulse {
    pub linear: Vec3,
    pub angular: Vec3,
}

/// Impulse along the spawn normal plus a random angular impulse on each axis,
/// every magnitude drawn from the launch force range.
pub fn launch_impulse(normal: Vec3, config: &SpawnerConfig, rng: &mut GameRng) -> LaunchImpulse {
    let (min, max) = (config.min_launch_force, config.max_launch_force);
    let force = rng.range(min, max);
    let torque = Vec3::new(rng.range(min, max), rng.range(min, max), rng.range(min, max));
    LaunchImpulse {
        linear: normal * force,
        angular: torque,
    }
}
