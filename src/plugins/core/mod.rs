//! Core plugin: shared resources, global settings and the frame layout.

use bevy::prelude::*;

use crate::common::rng::GameRng;
use crate::common::state::{round_in_progress, GameplaySet};
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    if !app.world().contains_resource::<Tunables>() {
        app.insert_resource(Tunables::default());
    }
    app.world().resource::<Tunables>().validate();

    app.init_resource::<GameRng>();
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));

    app.configure_sets(
        Update,
        (
            GameplaySet::Input,
            GameplaySet::Control,
            GameplaySet::Tick,
            GameplaySet::Reclaim,
        )
            .chain()
            .run_if(round_in_progress),
    );
}
