use std::time::Duration;

use avian3d::prelude::*;
use bevy::ecs::system::EntityCommands;
use bevy::prelude::*;

use crate::common::layers::{active_plate_layers, inactive_layers, Layer};
use crate::common::tasks::{progress, secs, TaskQueue};
use crate::plugins::pool::InstanceFactory;
use crate::plugins::spawner::LaunchImpulse;

/// Fully intact.
pub const UNBURNED: f32 = -1.0;
/// Fully consumed.
pub const BURNED: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PlateConfig {
    /// Seconds from the first hit until the plate is gone.
    pub time_to_burn: f32,
    pub radius: f32,
    pub thickness: f32,
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self {
            time_to_burn: 1.0,
            radius: 0.1,
            thickness: 0.02,
        }
    }
}

impl PlateConfig {
    pub fn validate(&self) {
        assert!(
            self.time_to_burn >= 0.0 && self.radius > 0.0 && self.thickness > 0.0,
            "plate misconfigured: {self:?}"
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlateTask {
    Burn,
}

/// One frame of the burn interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BurnStep {
    Burning(f32),
    Burned,
}

/// A target. Burn progress runs from `UNBURNED` to `BURNED` after a hit.
#[derive(Component, Debug, Clone)]
pub struct Plate {
    config: PlateConfig,
    burn_progress: f32,
    burn_started: Option<Duration>,
    tasks: TaskQueue<PlateTask>,
}

impl Plate {
    pub fn new(config: PlateConfig) -> Self {
        Self {
            config,
            burn_progress: UNBURNED,
            burn_started: None,
            tasks: TaskQueue::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &PlateConfig {
        &self.config
    }

    #[inline]
    pub fn is_burning(&self) -> bool {
        self.tasks.is_scheduled(PlateTask::Burn)
    }

    /// In `[UNBURNED, BURNED]`.
    #[inline]
    pub fn burn_progress(&self) -> f32 {
        self.burn_progress
    }

    /// Begin burning. No-op if a burn is already running.
    pub fn trigger_burn(&mut self, now: Duration) -> bool {
        if !self.tasks.start(PlateTask::Burn, now) {
            return false;
        }
        self.burn_started = Some(now);
        true
    }

    pub fn poll(&mut self, now: Duration) -> Option<BurnStep> {
        let mut step = None;

        for task in self.tasks.drain_due(now) {
            match task {
                PlateTask::Burn => {
                    let Some(started) = self.burn_started else {
                        continue;
                    };
                    let t = progress(
                        now.saturating_sub(started),
                        secs(self.config.time_to_burn),
                    );
                    self.burn_progress = UNBURNED + (BURNED - UNBURNED) * t;

                    if t >= 1.0 {
                        self.burn_progress = BURNED;
                        self.burn_started = None;
                        step = Some(BurnStep::Burned);
                    } else {
                        self.tasks.start(PlateTask::Burn, now);
                        step = Some(BurnStep::Burning(self.burn_progress));
                    }
                }
            }
        }

        step
    }
}

/// Builds pooled plates. Every acquire installs a fresh, unburned `Plate`.
#[derive(Debug, Clone, Default)]
pub struct PlateFactory {
    config: PlateConfig,
}

impl PlateFactory {
    pub fn new(config: PlateConfig) -> Self {
        config.validate();
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &PlateConfig {
        &self.config
    }
}

impl InstanceFactory for PlateFactory {
    fn spawn(&self, commands: &mut Commands, _pool: Entity) -> Entity {
        commands
            .spawn((
                Name::new("Plate(Pooled)"),
                Plate::new(self.config.clone()),
                Transform::default(),
                Visibility::Hidden,
                RigidBody::Dynamic,
                Collider::cylinder(self.config.radius, self.config.thickness),
                inactive_layers(Layer::Plate),
                LinearVelocity::ZERO,
                AngularVelocity::ZERO,
                GravityScale(0.0),
                CollisionEventsEnabled,
            ))
            .id()
    }

    fn on_acquire(&self, instance: &mut EntityCommands) {
        instance.remove::<LaunchImpulse>().insert((
            Plate::new(self.config.clone()),
            Visibility::Inherited,
            LinearVelocity::ZERO,
            AngularVelocity::ZERO,
            GravityScale(1.0),
            active_plate_layers(),
        ));
    }

    fn on_release(&self, instance: &mut EntityCommands) {
        // Parked plates must not drift under gravity or a late launch.
        instance.remove::<LaunchImpulse>().insert((
            Visibility::Hidden,
            LinearVelocity::ZERO,
            AngularVelocity::ZERO,
            GravityScale(0.0),
            inactive_layers(Layer::Plate),
        ));
    }
}
