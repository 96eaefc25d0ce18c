use bevy::prelude::*;

use crate::plugins::pool::{ObjectPool, PoolState, Pooled};

use super::{BurnStep, Plate, PlateFactory, PlateGone};

/// Step every burning plate; a finished burn announces the plate is gone.
pub fn advance_plate_burn(
    time: Res<Time>,
    mut q: Query<(Entity, &mut Plate, &PoolState, &Pooled)>,
    mut gone: MessageWriter<PlateGone>,
) {
    let now = time.elapsed();

    for (e, mut plate, state, member) in &mut q {
        if *state != PoolState::Active || !plate.is_burning() {
            continue;
        }

        if let Some(BurnStep::Burned) = plate.poll(now) {
            debug!("plate {e:?}: burned");
            gone.write(PlateGone {
                plate: e,
                lease: member.lease,
            });
        }
    }
}

/// Return gone plates to the spawner pool they came from, unless the watchdog took
/// them back first and the spawner already launched them again.
pub fn reclaim_gone_plates(
    mut commands: Commands,
    mut reader: MessageReader<PlateGone>,
    q_members: Query<&Pooled>,
    mut q_pools: Query<&mut ObjectPool<PlateFactory>>,
) {
    for ev in reader.read() {
        let Ok(member) = q_members.get(ev.plate) else {
            continue;
        };
        let Ok(mut pool) = q_pools.get_mut(member.pool) else {
            continue;
        };
        if !pool.release_lease(&mut commands, ev.plate, ev.lease) {
            debug!("plate {:?}: {:?} already ended", ev.plate, ev.lease);
        }
    }
}
