//! World-space position of an entity.
//!
//! This is the transform capability the collision pass requires: entities
//! with a [`Collision`](super::collision::Collision) but no `MapPosition`
//! cannot be placed in the world and are left out of the pass.
use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }

    /// Current world position.
    pub fn world_position(&self) -> Vec2 {
        self.pos
    }
}
