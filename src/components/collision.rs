//! Collision capability component.
//!
//! An entity takes part in the collision pass when it carries a [`Collision`]
//! component together with a
//! [`MapPosition`](crate::components::mapposition::MapPosition).
//!
//! Filtering is asymmetric: `a` reacts to `b` only when `a.mask & b.kind != 0`.
//! The opposite direction is decided independently when the pass visits
//! `(b, a)`.
//!
//! # Example
//!
//! ```ignore
//! const PLAYER: u32 = 1 << 0;
//! const PICKUP: u32 = 1 << 1;
//!
//! world.spawn((
//!     MapPosition::new(0.0, 0.0),
//!     Collision::new(Aabb::from_size(16.0, 16.0))
//!         .with_kind(PLAYER)
//!         .with_mask(PICKUP),
//! ));
//! ```

use bevy_ecs::prelude::Component;
use bitflags::bitflags;

use crate::aabb::Aabb;

bitflags! {
    /// Behavior modifiers for a [`Collision`] component.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CollisionFlags: u32 {
        /// Fire while the boxes do NOT overlap (boundary / trigger exit).
        const REVERSED = 1 << 0;
    }
}

/// Collision capability of an entity.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Bounding box in local space, relative to the entity position.
    pub bounding_box: Aabb,
    /// Type bits this entity is identified by.
    pub kind: u32,
    /// Type bits this entity reacts to.
    pub mask: u32,
    pub flags: CollisionFlags,
    /// Persistent on/off switch. Disabled components are skipped when
    /// gathering and stop a running pass for this entity.
    pub enabled: bool,
}

impl Collision {
    /// Enabled collision with the given local box, reacting to every type.
    pub fn new(bounding_box: Aabb) -> Self {
        Self {
            bounding_box,
            kind: 1,
            mask: u32::MAX,
            flags: CollisionFlags::empty(),
            enabled: true,
        }
    }

    pub fn with_kind(mut self, kind: u32) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_mask(mut self, mask: u32) -> Self {
        self.mask = mask;
        self
    }

    pub fn with_flags(mut self, flags: CollisionFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Shorthand for adding [`CollisionFlags::REVERSED`].
    pub fn reversed(mut self) -> Self {
        self.flags |= CollisionFlags::REVERSED;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Whether this entity is configured to react to entities of `kind`.
    pub fn reacts_to(&self, kind: u32) -> bool {
        self.mask & kind != 0
    }

    pub fn is_reversed(&self) -> bool {
        self.flags.contains(CollisionFlags::REVERSED)
    }
}
