//! Common, shared types.

pub mod layers;
pub mod rng;
pub mod state;
pub mod tasks;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
