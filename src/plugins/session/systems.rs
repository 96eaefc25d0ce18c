use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::gun::Gun;
use crate::plugins::spawner::PlateSpawner;

use super::{GameSession, RoundClock, RoundEnded, RoundTick};

/// Fresh counters and a fresh clock every time play starts.
pub fn begin_round(
    time: Res<Time>,
    mut session: ResMut<GameSession>,
    mut clock: ResMut<RoundClock>,
    guns: Query<&Gun>,
) {
    let ammo = guns.iter().next().map_or(0, Gun::current_ammo);
    session.reset(ammo);
    clock.start(time.elapsed());
    info!(
        "round: countdown from {}s, {}s on the clock",
        clock.config().countdown_secs,
        clock.config().round_secs
    );
}

pub fn tick_round_clock(
    time: Res<Time>,
    mut clock: ResMut<RoundClock>,
    session: Res<GameSession>,
    mut next: ResMut<NextState<GameState>>,
    mut ended: MessageWriter<RoundEnded>,
) {
    let Some(tick) = clock.poll(time.elapsed()) else {
        return;
    };

    match tick {
        RoundTick::Countdown(n) => debug!("round: {n}..."),
        RoundTick::Started(s) => info!("round: started, {s}s left"),
        RoundTick::Remaining(s) => debug!("round: {s}s left"),
        RoundTick::Ended => {
            info!(
                "round: over, {} hits from {} shots",
                session.hits(),
                session.shots_fired()
            );
            ended.write(RoundEnded {
                hits: session.hits(),
                shots_fired: session.shots_fired(),
            });
            next.set(GameState::RoundOver);
        }
    }
}

/// Silence every gun and spawner once the round is over.
pub fn halt_gameplay(mut guns: Query<&mut Gun>, mut spawners: Query<&mut PlateSpawner>) {
    for mut gun in &mut guns {
        gun.stop_shooting();
    }
    for mut spawner in &mut spawners {
        spawner.stop_spawning();
    }
}
