//! Kinematic body component.
//!
//! The [`RigidBody`] component stores a constant velocity consumed by the
//! [`movement_system`](crate::systems::movement::movement_system). It exists so
//! scenes can move colliders between collision passes; there is no physical
//! response to collisions.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Kinematic body storing a velocity in world units per second.
///
/// `frozen` makes the movement system skip the entity.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct RigidBody {
    pub velocity: Vec2,
    pub frozen: bool,
}

impl RigidBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            frozen: false,
        }
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }
}
