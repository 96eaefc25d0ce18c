//! Tunable gameplay constants.
//!
//! One resource holds the default config of every controller. Scene setup copies
//! these into the components it spawns; tests insert their own `Tunables` before
//! the core plugin runs.

use bevy::prelude::*;

use crate::plugins::gun::GunConfig;
use crate::plugins::plates::PlateConfig;
use crate::plugins::session::RoundConfig;
use crate::plugins::shots::ShotConfig;
use crate::plugins::spawner::SpawnerConfig;
use crate::plugins::tracking::GunMarkerConfig;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub gun: GunConfig,
    pub shot: ShotConfig,
    pub plate: PlateConfig,
    pub spawner: SpawnerConfig,
    pub gun_marker: GunMarkerConfig,
    pub round: RoundConfig,
    pub shot_pool_size: usize,
    pub plate_pool_size: usize,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            gun: GunConfig::default(),
            shot: ShotConfig::default(),
            plate: PlateConfig::default(),
            spawner: SpawnerConfig::default(),
            gun_marker: GunMarkerConfig::default(),
            round: RoundConfig::default(),
            shot_pool_size: 16,
            plate_pool_size: 8,
        }
    }
}

impl Tunables {
    /// Panics on the first misconfigured section.
    pub fn validate(&self) {
        self.gun.validate();
        self.shot.validate();
        self.plate.validate();
        self.spawner.validate();
        self.gun_marker.validate();
    }
}
