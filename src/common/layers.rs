//! Collision layers.

use avian3d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    Table,
    Shot,
    Plate,
}

/// Active shots hit the table and plates.
#[inline]
pub fn active_shot_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Shot, [Layer::Table, Layer::Plate])
}

/// Active plates hit the table and shots.
#[inline]
pub fn active_plate_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Plate, [Layer::Table, Layer::Shot])
}

/// "Disabled" without structural changes: empty filters means we collide with nothing.
#[inline]
pub fn inactive_layers(membership: Layer) -> CollisionLayers {
    CollisionLayers::new(membership, [] as [Layer; 0])
}

#[inline]
pub fn is_in_layer(layers: &CollisionLayers, layer: Layer) -> bool {
    layers.memberships.has_all(layer)
}
