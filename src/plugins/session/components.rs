use std::time::Duration;

use bevy::prelude::*;

use crate::common::tasks::TaskQueue;

/// Per-session counters, injected into the systems that update them.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSession {
    hits: u32,
    shots_fired: u32,
    ammo: u32,
}

impl GameSession {
    #[inline]
    pub fn hits(&self) -> u32 {
        self.hits
    }

    #[inline]
    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    /// Rounds left in the gun, as of its last shot or reload.
    #[inline]
    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn register_hit(&mut self) {
        self.hits += 1;
    }

    pub fn register_shot(&mut self, ammo_left: u32) {
        self.shots_fired += 1;
        self.ammo = ammo_left;
    }

    pub fn set_ammo(&mut self, ammo: u32) {
        self.ammo = ammo;
    }

    pub fn reset(&mut self, ammo: u32) {
        *self = Self {
            ammo,
            ..default()
        };
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundConfig {
    /// Whole seconds counted down before the round starts.
    pub countdown_secs: u32,
    /// Whole seconds on the round timer once it starts.
    pub round_secs: u32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            countdown_secs: 3,
            round_secs: 19,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundPhase {
    #[default]
    Idle,
    /// Seconds until the round timer starts.
    Countdown(u32),
    /// Seconds left on the round timer.
    Running(u32),
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoundTask {
    Tick,
}

/// Observable clock transition, one per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundTick {
    Countdown(u32),
    Started(u32),
    Remaining(u32),
    Ended,
}

/// Countdown, then the round timer; one tick after reaching zero the round ends.
///
/// ```text
/// Idle --start--> Countdown(3) -> 2 -> 1 -> Running(19) -> 18 .. 0 -> Finished
/// ```
#[derive(Resource, Debug, Clone, Default)]
pub struct RoundClock {
    config: RoundConfig,
    phase: RoundPhase,
    tasks: TaskQueue<RoundTask>,
}

const TICK: Duration = Duration::from_secs(1);

impl RoundClock {
    pub fn new(config: RoundConfig) -> Self {
        Self {
            config,
            ..default()
        }
    }

    #[inline]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[inline]
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Restart from the top of the countdown.
    pub fn start(&mut self, now: Duration) {
        self.phase = match self.config.countdown_secs {
            0 => RoundPhase::Running(self.config.round_secs),
            n => RoundPhase::Countdown(n),
        };
        self.tasks.restart(RoundTask::Tick, now + TICK);
    }

    pub fn stop(&mut self) {
        self.tasks.clear();
        self.phase = RoundPhase::Idle;
    }

    pub fn poll(&mut self, now: Duration) -> Option<RoundTick> {
        let mut out = None;

        for task in self.tasks.drain_due(now) {
            match task {
                RoundTask::Tick => {
                    let (phase, tick) = match self.phase {
                        RoundPhase::Countdown(n) if n > 1 => {
                            (RoundPhase::Countdown(n - 1), RoundTick::Countdown(n - 1))
                        }
                        RoundPhase::Countdown(_) => (
                            RoundPhase::Running(self.config.round_secs),
                            RoundTick::Started(self.config.round_secs),
                        ),
                        RoundPhase::Running(0) => (RoundPhase::Finished, RoundTick::Ended),
                        RoundPhase::Running(s) => {
                            (RoundPhase::Running(s - 1), RoundTick::Remaining(s - 1))
                        }
                        RoundPhase::Idle | RoundPhase::Finished => continue,
                    };

                    self.phase = phase;
                    if phase != RoundPhase::Finished {
                        self.tasks.start(RoundTask::Tick, now + TICK);
                    }
                    out = Some(tick);
                }
            }
        }

        out
    }
}
