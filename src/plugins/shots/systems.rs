use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::{is_in_layer, Layer};
use crate::plugins::plates::Plate;
use crate::plugins::pool::{ObjectPool, PoolState, Pooled};
use crate::plugins::session::GameSession;

use super::{Shot, ShotFactory, ShotVanished, VanishStep};

#[derive(Clone, Copy, Debug)]
struct CollisionSide {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionSide {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn sides(ev: &CollisionStart) -> (CollisionSide, CollisionSide) {
    (
        CollisionSide {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionSide {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

/// React to physics contacts reported for active shots.
///
/// Every contact: burn the plate that was hit, count a hit if the other collider is
/// on the plate layer. First contact only: start the vanish animation.
pub fn resolve_shot_collisions(
    time: Res<Time>,
    mut started: MessageReader<CollisionStart>,
    mut q_shots: Query<(&mut Shot, &Transform, &PoolState)>,
    mut q_plates: Query<&mut Plate>,
    q_layers: Query<&CollisionLayers>,
    mut session: ResMut<GameSession>,
) {
    let now = time.elapsed();

    for ev in started.read() {
        let (s1, s2) = sides(ev);

        let is_shot1 = q_shots.contains(s1.collider);
        let is_shot2 = q_shots.contains(s2.collider);
        if !(is_shot1 ^ is_shot2) {
            continue; // must be exactly one shot
        }
        let (shot_side, other_side) = if is_shot1 { (s1, s2) } else { (s2, s1) };

        let Ok((mut shot, tf, state)) = q_shots.get_mut(shot_side.collider) else {
            continue;
        };
        if *state != PoolState::Active {
            continue;
        }

        if shot.begin_vanish(now, tf.scale) {
            debug!("shot {:?}: hit, vanishing", shot_side.collider);
        }

        if let Ok(mut plate) = q_plates.get_mut(other_side.gameplay_owner()) {
            plate.trigger_burn(now);
        }

        if q_layers
            .get(other_side.collider)
            .is_ok_and(|layers| is_in_layer(layers, Layer::Plate))
        {
            session.register_hit();
        }
    }
}

/// Shrink vanishing shots frame by frame; report the ones that reached zero.
pub fn animate_vanishing_shots(
    time: Res<Time>,
    mut q: Query<(Entity, &mut Shot, &mut Transform, &PoolState, &Pooled)>,
    mut vanished: MessageWriter<ShotVanished>,
) {
    let now = time.elapsed();

    for (e, mut shot, mut tf, state, member) in &mut q {
        if *state != PoolState::Active || !shot.is_vanishing() {
            continue;
        }

        match shot.poll(now) {
            Some(VanishStep::Shrinking(scale)) => tf.scale = scale,
            Some(VanishStep::Gone) => {
                tf.scale = Vec3::ZERO;
                vanished.write(ShotVanished {
                    shot: e,
                    lease: member.lease,
                });
            }
            None => {}
        }
    }
}

/// Return vanished shots to the pool they came from.
///
/// Races with the gun's lifetime expiry; whichever runs first performs the release.
/// A shot that expired and was fired again in the same frame holds a newer lease and
/// stays out.
pub fn reclaim_vanished_shots(
    mut commands: Commands,
    mut reader: MessageReader<ShotVanished>,
    q_members: Query<&Pooled>,
    mut q_pools: Query<&mut ObjectPool<ShotFactory>>,
) {
    for ev in reader.read() {
        let Ok(member) = q_members.get(ev.shot) else {
            continue;
        };
        let Ok(mut pool) = q_pools.get_mut(member.pool) else {
            continue;
        };
        if !pool.release_lease(&mut commands, ev.shot, ev.lease) {
            debug!("shot {:?}: {:?} already ended", ev.shot, ev.lease);
        }
    }
}
