use bevy::prelude::*;

use crate::plugins::pool::ObjectPool;
use crate::plugins::session::GameSession;
use crate::plugins::shots::{self, ShotFactory};

use super::{Gun, GunAction, OutOfAmmo, Reloaded, ShotTriggered, Sight};

/// Boundary check + auto start for guns entering the world.
pub fn arm_new_guns(time: Res<Time>, mut q: Query<(Entity, &mut Gun), Added<Gun>>) {
    for (e, mut gun) in &mut q {
        gun.config().validate();
        if gun.config().start_shooting {
            gun.start_shooting(time.elapsed());
        }
        debug!("gun {e:?} armed with {} rounds", gun.current_ammo());
    }
}

/// Recompute aim from the live world transform, every frame.
pub fn update_sight(mut q: Query<(&GlobalTransform, &Gun, &mut Sight)>) {
    for (gtf, gun, mut sight) in &mut q {
        let next = Sight::from_transform(gtf, gun.config());
        if *sight != next {
            *sight = next;
        }
    }
}

/// Drive every gun's timed tasks: trigger pulls, reload completion, shot expiry.
pub fn run_gun_tasks(
    mut commands: Commands,
    time: Res<Time>,
    mut session: ResMut<GameSession>,
    mut guns: Query<(Entity, &mut Gun, &Sight, &mut ObjectPool<ShotFactory>)>,
    mut shot_triggered: MessageWriter<ShotTriggered>,
    mut out_of_ammo: MessageWriter<OutOfAmmo>,
    mut reloaded: MessageWriter<Reloaded>,
) {
    let now = time.elapsed();

    for (gun_e, mut gun, sight, mut pool) in &mut guns {
        for action in gun.poll(now) {
            match action {
                GunAction::Fire { depleted } => {
                    let shot = pool.acquire(&mut commands, gun_e);
                    shots::fire(
                        &mut commands.entity(shot),
                        sight.origin,
                        sight.direction,
                        pool.factory().config(),
                    );
                    gun.track_shot(shot, now);
                    session.register_shot(gun.current_ammo());

                    debug!(
                        "gun {gun_e:?}: fired {shot:?}, {} rounds left",
                        gun.current_ammo()
                    );
                    shot_triggered.write(ShotTriggered { gun: gun_e, shot });

                    if depleted {
                        info!("gun {gun_e:?}: out of ammo");
                        out_of_ammo.write(OutOfAmmo { gun: gun_e });
                    }
                }
                GunAction::DryFire => {
                    debug!("gun {gun_e:?}: no ammo");
                }
                GunAction::Reloaded => {
                    session.set_ammo(gun.current_ammo());
                    info!("gun {gun_e:?}: reloaded");
                    reloaded.write(Reloaded { gun: gun_e });
                }
                GunAction::ExpireShot(shot) => {
                    if pool.release(&mut commands, shot) {
                        debug!("gun {gun_e:?}: shot {shot:?} expired");
                    }
                }
            }
        }
    }
}
