use std::time::Duration;

use avian3d::prelude::*;
use bevy::ecs::system::EntityCommands;
use bevy::prelude::*;

use crate::common::layers::{active_shot_layers, inactive_layers, Layer};
use crate::common::tasks::{progress, secs, TaskQueue};
use crate::plugins::pool::InstanceFactory;

#[derive(Debug, Clone, PartialEq)]
pub struct ShotConfig {
    pub speed: f32,
    /// Seconds to shrink to nothing after the first hit.
    pub time_to_disappear: f32,
    pub radius: f32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            speed: 10.0,
            time_to_disappear: 1.0,
            radius: 0.02,
        }
    }
}

impl ShotConfig {
    pub fn validate(&self) {
        assert!(
            self.speed >= 0.0 && self.time_to_disappear >= 0.0 && self.radius > 0.0,
            "shot misconfigured: {self:?}"
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShotTask {
    Vanish,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Vanish {
    started: Duration,
    initial_scale: Vec3,
    finished: bool,
}

/// One frame of the vanish animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VanishStep {
    Shrinking(Vec3),
    Gone,
}

#[derive(Component, Debug, Clone)]
pub struct Shot {
    config: ShotConfig,
    direction: Vec3,
    vanish: Option<Vanish>,
    tasks: TaskQueue<ShotTask>,
}

impl Shot {
    pub fn new(config: ShotConfig) -> Self {
        Self {
            config,
            direction: Vec3::NEG_X,
            vanish: None,
            tasks: TaskQueue::new(),
        }
    }

    fn aimed(config: ShotConfig, direction: Vec3) -> Self {
        Self {
            direction,
            ..Self::new(config)
        }
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn config(&self) -> &ShotConfig {
        &self.config
    }

    #[inline]
    pub fn is_vanishing(&self) -> bool {
        self.vanish.is_some_and(|v| !v.finished)
    }

    /// Start shrinking from `current_scale`. No-op if a vanish already started.
    pub fn begin_vanish(&mut self, now: Duration, current_scale: Vec3) -> bool {
        if self.vanish.is_some() {
            return false;
        }
        self.vanish = Some(Vanish {
            started: now,
            initial_scale: current_scale,
            finished: false,
        });
        self.tasks.start(ShotTask::Vanish, now);
        true
    }

    pub fn poll(&mut self, now: Duration) -> Option<VanishStep> {
        let mut step = None;

        for task in self.tasks.drain_due(now) {
            match task {
                ShotTask::Vanish => {
                    let Some(vanish) = self.vanish.as_mut() else {
                        continue;
                    };
                    let t = progress(
                        now.saturating_sub(vanish.started),
                        secs(self.config.time_to_disappear),
                    );

                    if t >= 1.0 {
                        vanish.finished = true;
                        step = Some(VanishStep::Gone);
                    } else {
                        self.tasks.start(ShotTask::Vanish, now);
                        step = Some(VanishStep::Shrinking(
                            vanish.initial_scale.lerp(Vec3::ZERO, t),
                        ));
                    }
                }
            }
        }

        step
    }
}

/// Physics state of a shot leaving the muzzle.
pub fn launch_state(
    origin: Vec3,
    direction: Vec3,
    speed: f32,
) -> (Transform, LinearVelocity, AngularVelocity, GravityScale) {
    let dir = direction.try_normalize().unwrap_or(Vec3::Y);
    (
        Transform::from_translation(origin).looking_to(dir, Vec3::Y),
        LinearVelocity(dir * speed),
        AngularVelocity::ZERO,
        GravityScale(0.0),
    )
}

/// Aim an acquired shot: clear its motion, face `direction`, no gravity, full speed.
pub fn fire(shot: &mut EntityCommands, origin: Vec3, direction: Vec3, config: &ShotConfig) {
    let dir = direction.try_normalize().unwrap_or(Vec3::Y);
    shot.insert((
        Shot::aimed(config.clone(), dir),
        launch_state(origin, dir, config.speed),
    ));
}

/// Builds pooled shots and resets them between uses.
#[derive(Debug, Clone, Default)]
pub struct ShotFactory {
    config: ShotConfig,
}

impl ShotFactory {
    pub fn new(config: ShotConfig) -> Self {
        config.validate();
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &ShotConfig {
        &self.config
    }
}

impl InstanceFactory for ShotFactory {
    fn spawn(&self, commands: &mut Commands, _pool: Entity) -> Entity {
        commands
            .spawn((
                Name::new("Shot(Pooled)"),
                Shot::new(self.config.clone()),
                Transform::default(),
                Visibility::Hidden,
                RigidBody::Dynamic,
                Collider::sphere(self.config.radius),
                inactive_layers(Layer::Shot),
                LinearVelocity::ZERO,
                AngularVelocity::ZERO,
                GravityScale(0.0),
                // Opt-in collision events: Avian only emits CollisionStart if one collider has this.
                CollisionEventsEnabled,
            ))
            .id()
    }

    fn on_acquire(&self, instance: &mut EntityCommands) {
        instance.insert((
            Shot::new(self.config.clone()),
            Transform::default(),
            Visibility::Inherited,
            active_shot_layers(),
        ));
    }

    fn on_release(&self, instance: &mut EntityCommands) {
        instance.insert((
            Visibility::Hidden,
            LinearVelocity::ZERO,
            AngularVelocity::ZERO,
            inactive_layers(Layer::Shot),
        ));
    }
}
