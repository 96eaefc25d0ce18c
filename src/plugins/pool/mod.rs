//! Generic object pool for reusable entities.
//!
//! # Ownership model
//! An instance is owned by exactly one of:
//! - the pool free list (`PoolState::Inactive`, hidden, collides with nothing), or
//! - an in-use context (`PoolState::Active`), which must hand it back through `release`.
//!
//! The pool keeps its own synchronous record of active instances. That record is the
//! guard against double returns: two independent triggers (e.g. a shot's lifetime timer
//! and its vanish animation) may both call `release`, and only the first one lands.
//!
//! # Leases
//! Every acquire opens a new lease, numbered per pool. A trigger that is reported one
//! phase after it happened carries the lease it observed and releases through
//! `release_lease`, so it cannot free the next use of a recycled instance.
//!
//! # Growth
//! `acquire` never fails: an empty free list falls back to constructing a new instance.
//! There is no upper bound, so leaking callers grow the pool without limit.
//!
//! # Specialization
//! How an instance is built, activated and parked is supplied by an `InstanceFactory`
//! type parameter, so each pool is monomorphized for its instance kind.
//!
//! ```text
//!   prepopulate ──> free: [a, b]          (initial_size, all Inactive)
//!   acquire()   ──> pop b  (Active, lease 1) (LIFO reuse)
//!   acquire()   ──> pop a
//!   acquire()   ──> construct c           (free list empty)
//!   release(a)  ──> push a (Inactive)
//!   release(a)  ──> rejected, returns false
//! ```

use bevy::ecs::system::EntityCommands;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;

/// One use of a pooled instance, from acquire to release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Lease(pub u32);

/// Identity of a pooled instance: the entity that owns its pool, and the lease of
/// its current (or last) use.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pooled {
    pub pool: Entity,
    pub lease: Lease,
}

/// Mirror of the pool's bookkeeping on the instance itself, for queries.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolState {
    #[default]
    Inactive,
    Active,
}

/// Builds and (re)initializes the instances of one pool.
pub trait InstanceFactory: Send + Sync + 'static {
    /// Spawn a brand new instance. `pool` is the owning entity.
    fn spawn(&self, commands: &mut Commands, pool: Entity) -> Entity;

    /// Runs every time an instance moves free -> in-use, including the first time.
    fn on_acquire(&self, _instance: &mut EntityCommands) {}

    /// Runs every time an instance moves in-use -> free, and when it is first parked.
    fn on_release(&self, _instance: &mut EntityCommands) {}
}

#[derive(Component, Debug)]
pub struct ObjectPool<F: InstanceFactory> {
    factory: F,
    initial_size: usize,
    free: Vec<Entity>,
    active: HashMap<Entity, Lease>,
    leases: u32,
    constructed: usize,
    prepopulated: bool,
}

impl<F: InstanceFactory> ObjectPool<F> {
    pub fn new(factory: F, initial_size: usize) -> Self {
        Self {
            factory,
            initial_size,
            free: Vec::with_capacity(initial_size),
            active: HashMap::default(),
            leases: 0,
            constructed: 0,
            prepopulated: false,
        }
    }

    #[inline]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    #[inline]
    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    /// Total instances ever built by this pool.
    #[inline]
    pub fn constructed(&self) -> usize {
        self.constructed
    }

    #[inline]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_active(&self, instance: Entity) -> bool {
        self.active.contains_key(&instance)
    }

    /// The open lease of `instance`, if it is in use.
    #[inline]
    pub fn lease(&self, instance: Entity) -> Option<Lease> {
        self.active.get(&instance).copied()
    }

    /// Build `initial_size` parked instances. Runs once per pool.
    pub fn prepopulate(&mut self, commands: &mut Commands, owner: Entity) {
        if self.prepopulated {
            return;
        }
        self.prepopulated = true;

        for _ in 0..self.initial_size {
            let e = self.construct(commands, owner);
            let mut ec = commands.entity(e);
            ec.insert(PoolState::Inactive);
            self.factory.on_release(&mut ec);
            self.free.push(e);
        }

        debug!(
            "pool {owner:?}: prepopulated {} instances",
            self.initial_size
        );
    }

    /// Take an instance out of the pool, building one if the free list is empty.
    pub fn acquire(&mut self, commands: &mut Commands, owner: Entity) -> Entity {
        let e = match self.free.pop() {
            Some(e) => e,
            None => {
                let e = self.construct(commands, owner);
                debug!(
                    "pool {owner:?}: free list empty, grew to {} instances",
                    self.constructed
                );
                e
            }
        };

        self.leases = self.leases.wrapping_add(1);
        let lease = Lease(self.leases);
        self.active.insert(e, lease);

        let mut ec = commands.entity(e);
        ec.insert((PoolState::Active, Pooled { pool: owner, lease }));
        self.factory.on_acquire(&mut ec);
        e
    }

    /// Hand an instance back. Returns `false` if it is not currently active in this
    /// pool (already released, or never acquired here); nothing changes in that case.
    pub fn release(&mut self, commands: &mut Commands, instance: Entity) -> bool {
        if self.active.remove(&instance).is_none() {
            return false;
        }
        self.park(commands, instance);
        true
    }

    /// Like `release`, but only while `lease` is still the instance's open lease.
    /// A stale lease (the instance was released and handed out again) is rejected.
    pub fn release_lease(
        &mut self,
        commands: &mut Commands,
        instance: Entity,
        lease: Lease,
    ) -> bool {
        if self.lease(instance) != Some(lease) {
            return false;
        }
        self.release(commands, instance)
    }

    fn park(&mut self, commands: &mut Commands, instance: Entity) {
        let mut ec = commands.entity(instance);
        ec.insert(PoolState::Inactive);
        self.factory.on_release(&mut ec);
        self.free.push(instance);
    }

    fn construct(&mut self, commands: &mut Commands, owner: Entity) -> Entity {
        let e = self.factory.spawn(commands, owner);
        commands.entity(e).insert(Pooled {
            pool: owner,
            lease: Lease::default(),
        });
        self.constructed += 1;
        e
    }
}

/// Pre-spawn instances for pools that were just added.
pub fn prepopulate_pools<F: InstanceFactory>(
    mut commands: Commands,
    mut pools: Query<(Entity, &mut ObjectPool<F>), Added<ObjectPool<F>>>,
) {
    for (owner, mut pool) in &mut pools {
        pool.prepopulate(&mut commands, owner);
    }
}

/// Register pool maintenance for one instance kind.
pub fn plugin<F: InstanceFactory>(app: &mut App) {
    app.add_systems(PreUpdate, prepopulate_pools::<F>);
}
