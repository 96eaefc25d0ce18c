use std::time::Duration;

use bevy::prelude::*;

use crate::common::tasks::{secs, TaskQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingStatus {
    Found,
    Lost,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GunMarkerConfig {
    /// How long after losing the marker a re-detection still counts as a reload gesture.
    pub max_time_to_start_reload: f32,
}

impl Default for GunMarkerConfig {
    fn default() -> Self {
        Self {
            max_time_to_start_reload: 2.0,
        }
    }
}

impl GunMarkerConfig {
    pub fn validate(&self) {
        assert!(
            self.max_time_to_start_reload >= 0.0,
            "gun marker misconfigured: {self:?}"
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerTask {
    CloseReloadWindow,
}

/// Tracked image that drives a gun: hide it to stop shooting, show it again
/// quickly to reload.
#[derive(Component, Debug, Clone)]
pub struct GunMarker {
    gun: Entity,
    config: GunMarkerConfig,
    can_start_reload: bool,
    tasks: TaskQueue<MarkerTask>,
}

impl GunMarker {
    pub fn new(gun: Entity, config: GunMarkerConfig) -> Self {
        Self {
            gun,
            config,
            can_start_reload: false,
            tasks: TaskQueue::new(),
        }
    }

    #[inline]
    pub fn gun(&self) -> Entity {
        self.gun
    }

    #[inline]
    pub fn config(&self) -> &GunMarkerConfig {
        &self.config
    }

    #[inline]
    pub fn can_start_reload(&self) -> bool {
        self.can_start_reload
    }

    /// Open (or reopen) the reload window.
    pub fn on_lost(&mut self, now: Duration) {
        self.can_start_reload = true;
        self.tasks.restart(
            MarkerTask::CloseReloadWindow,
            now.saturating_add(secs(self.config.max_time_to_start_reload)),
        );
    }

    /// Whether this detection falls inside the reload window.
    #[inline]
    pub fn on_found(&self) -> bool {
        self.can_start_reload
    }

    pub fn poll(&mut self, now: Duration) {
        for task in self.tasks.drain_due(now) {
            match task {
                MarkerTask::CloseReloadWindow => self.can_start_reload = false,
            }
        }
    }
}

/// Tracked table image; its visibility gates the linked spawner.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableMarker {
    pub spawner: Entity,
}
