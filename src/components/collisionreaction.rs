//! Per-entity collision reaction.
//!
//! [`CollisionReaction`] attaches custom response logic to a single entity
//! instead of a global observer. When the collision pass fires `(a, b)` and
//! `a` carries a reaction, the reaction runs right after the
//! [`CollisionEvent`](crate::events::collision::CollisionEvent) observers,
//! with the same `(self, other)` snapshots. Qualification, suppression and the
//! mid-pass disable rules are identical for both delivery paths.
//!
//! # Example
//!
//! ```ignore
//! world.spawn((
//!     MapPosition::new(0.0, 0.0),
//!     Collision::new(Aabb::from_size(8.0, 8.0)),
//!     CollisionReaction::new(|world, this, other| {
//!         // Pick up whatever we touch, once.
//!         world.despawn(other.entity);
//!         if let Some(mut c) = world.get_mut::<Collision>(this.entity) {
//!             c.enabled = false;
//!         }
//!     }),
//! ));
//! ```

use std::fmt;
use std::sync::Arc;

use bevy_ecs::prelude::*;

use crate::events::collision::CollisionObject;

/// Callback signature for collision reactions.
pub type ReactionFn = dyn Fn(&mut World, &CollisionObject, &CollisionObject) + Send + Sync;

#[derive(Component, Clone)]
pub struct CollisionReaction {
    callback: Arc<ReactionFn>,
}

impl CollisionReaction {
    pub fn new(
        callback: impl Fn(&mut World, &CollisionObject, &CollisionObject) + Send + Sync + 'static,
    ) -> Self {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Run the reaction for `this` colliding with `other`.
    pub fn react(&self, world: &mut World, this: &CollisionObject, other: &CollisionObject) {
        (self.callback)(world, this, other);
    }
}

impl fmt::Debug for CollisionReaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionReaction").finish_non_exhaustive()
    }
}
