use std::time::Duration;

use bevy::prelude::*;

use crate::common::tasks::{secs, TaskQueue};

#[derive(Debug, Clone, PartialEq)]
pub struct GunConfig {
    pub max_ammo: u32,
    /// Seconds between two trigger pulls while shooting.
    pub time_between_shots: f32,
    pub reload_time: f32,
    /// Seconds a fired shot lives before it is handed back to the pool.
    pub shot_lifetime: f32,
    pub sight_length: f32,
    /// Muzzle offset in gun-local space.
    pub shot_start_offset: Vec3,
    /// Start shooting as soon as the gun enters the world.
    pub start_shooting: bool,
}

impl Default for GunConfig {
    fn default() -> Self {
        Self {
            max_ammo: 100,
            time_between_shots: 1.0,
            reload_time: 2.0,
            shot_lifetime: 0.1,
            sight_length: 10.0,
            shot_start_offset: Vec3::ZERO,
            start_shooting: false,
        }
    }
}

impl GunConfig {
    /// Panics on a misconfigured gun.
    pub fn validate(&self) {
        assert!(
            self.time_between_shots >= 0.0
                && self.reload_time >= 0.0
                && self.shot_lifetime >= 0.0
                && self.sight_length >= 0.0,
            "gun misconfigured: durations and sight length must be non-negative: {self:?}"
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GunTask {
    Shoot,
    Reload,
    ExpireShot(Entity),
}

/// What a due gun task asks the world to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GunAction {
    /// Spend one round. `depleted` is set on the shot that empties the magazine.
    Fire { depleted: bool },
    /// Trigger pulled on an empty magazine.
    DryFire,
    Reloaded,
    ExpireShot(Entity),
}

/// Shooting / reload state machine.
///
/// ```text
/// Idle --start_shooting--> Shooting --reload--> Reloading --(reload_time)--> Shooting
///  ^                          |
///  +-------stop_shooting------+
/// ```
///
/// Shooting and Reloading are never both set: `reload` cancels the shooting task and
/// `start_shooting` is refused while reloading.
#[derive(Component, Debug, Clone)]
#[require(Sight, Transform)]
pub struct Gun {
    config: GunConfig,
    current_ammo: u32,
    reloading: bool,
    tasks: TaskQueue<GunTask>,
}

impl Gun {
    pub fn new(config: GunConfig) -> Self {
        Self {
            current_ammo: config.max_ammo,
            config,
            reloading: false,
            tasks: TaskQueue::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &GunConfig {
        &self.config
    }

    #[inline]
    pub fn current_ammo(&self) -> u32 {
        self.current_ammo
    }

    #[inline]
    pub fn max_ammo(&self) -> u32 {
        self.config.max_ammo
    }

    #[inline]
    pub fn is_shooting(&self) -> bool {
        self.tasks.is_scheduled(GunTask::Shoot)
    }

    #[inline]
    pub fn is_reloading(&self) -> bool {
        self.reloading
    }

    /// Shots whose expiry timer is still pending.
    pub fn shots_in_flight(&self) -> usize {
        self.tasks.len()
            - usize::from(self.is_shooting())
            - usize::from(self.tasks.is_scheduled(GunTask::Reload))
    }

    /// Begin the repeating trigger. First shot goes off on the next tick.
    ///
    /// No-op while shooting or reloading.
    pub fn start_shooting(&mut self, now: Duration) -> bool {
        if self.reloading || self.is_shooting() {
            return false;
        }
        self.tasks.start(GunTask::Shoot, now);
        info!("gun: start shooting ({} rounds left)", self.current_ammo);
        true
    }

    pub fn stop_shooting(&mut self) -> bool {
        let stopped = self.tasks.stop(GunTask::Shoot);
        if stopped {
            info!("gun: stop shooting");
        }
        stopped
    }

    /// Refill the magazine and block shooting for `reload_time`, then resume shooting.
    ///
    /// No-op while already reloading.
    pub fn reload(&mut self, now: Duration) -> bool {
        if self.reloading {
            return false;
        }
        self.reloading = true;
        self.stop_shooting();
        self.current_ammo = self.config.max_ammo;
        self.tasks.start(
            GunTask::Reload,
            now.saturating_add(secs(self.config.reload_time)),
        );
        info!("gun: reloading");
        true
    }

    /// Schedule the lifetime expiry of a freshly fired shot.
    pub fn track_shot(&mut self, shot: Entity, now: Duration) {
        self.tasks.restart(
            GunTask::ExpireShot(shot),
            now.saturating_add(secs(self.config.shot_lifetime)),
        );
    }

    /// Run every task that is due at `now`.
    pub fn poll(&mut self, now: Duration) -> Vec<GunAction> {
        let due = self.tasks.drain_due(now);
        let mut actions = Vec::with_capacity(due.len());

        for task in due {
            match task {
                GunTask::Shoot => {
                    if self.current_ammo == 0 {
                        actions.push(GunAction::DryFire);
                    } else {
                        self.current_ammo -= 1;
                        actions.push(GunAction::Fire {
                            depleted: self.current_ammo == 0,
                        });
                    }
                    self.tasks.start(
                        GunTask::Shoot,
                        now.saturating_add(secs(self.config.time_between_shots)),
                    );
                }
                GunTask::Reload => {
                    self.reloading = false;
                    actions.push(GunAction::Reloaded);
                    self.start_shooting(now);
                }
                GunTask::ExpireShot(shot) => actions.push(GunAction::ExpireShot(shot)),
            }
        }

        actions
    }
}

/// Where the gun is pointing, recomputed every frame from its world transform.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Sight {
    /// World-space muzzle position.
    pub origin: Vec3,
    /// World-space unit direction (the gun's local up axis).
    pub direction: Vec3,
    pub length: f32,
}

impl Default for Sight {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::Y,
            length: 0.0,
        }
    }
}

impl Sight {
    pub fn from_transform(gtf: &GlobalTransform, config: &GunConfig) -> Self {
        Self {
            origin: gtf.translation() + gtf.affine().transform_vector3(config.shot_start_offset),
            direction: *gtf.up(),
            length: config.sight_length,
        }
    }

    #[inline]
    pub fn end(&self) -> Vec3 {
        self.origin + self.direction * self.length
    }
}
