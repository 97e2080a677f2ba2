//! Movement system.
//!
//! Integrates [`RigidBody`] velocity into [`MapPosition`] using the scaled
//! [`WorldTime::delta`]. Run it before the collision pass so boxes are
//! gathered at their new positions.
use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::worldtime::WorldTime;

pub fn movement_system(mut query: Query<(&mut MapPosition, &RigidBody)>, time: Res<WorldTime>) {
    for (mut position, rigidbody) in query.iter_mut() {
        if rigidbody.frozen {
            continue;
        }
        position.pos += rigidbody.velocity * time.delta;
    }
}
