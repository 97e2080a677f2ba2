//! Collision notification types and a logging observer.
//!
//! The collision pass triggers a [`CollisionEvent`] for every ordered pair
//! that qualifies during a tick. Observers run immediately, before the pass
//! moves on, so they may despawn entities or switch off their
//! [`Collision`](crate::components::collision::Collision) and the rest of the
//! same pass sees the change.
//!
//! ```ignore
//! world.add_observer(|trigger: On<CollisionEvent>, mut commands: Commands| {
//!     let event = trigger.event();
//!     commands.entity(event.b.entity).despawn();
//! });
//! ```
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::aabb::Aabb;
use crate::components::group::Group;

/// Per-tick snapshot of one collision participant.
///
/// Only the world box is frozen at gather time, so moving the entity during
/// the pass does not change it. Type, mask and flags are not copied: the pass
/// reads them from the live
/// [`Collision`](crate::components::collision::Collision) through `entity`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionObject {
    pub entity: Entity,
    /// Bounding box in world space at gather time.
    pub world_aabb: Aabb,
    /// Visit flag for the running pass. Cleared when the entity dies or its
    /// collision gets disabled mid-pass; unrelated to
    /// [`Collision::enabled`](crate::components::collision::Collision::enabled).
    pub enabled: bool,
}

impl CollisionObject {
    pub fn new(entity: Entity, world_aabb: Aabb) -> Self {
        Self {
            entity,
            world_aabb,
            enabled: true,
        }
    }
}

/// Fired for an ordered pair `(a, b)`: `a` reacts to `b`.
///
/// The reverse pair is a separate event, fired only if `b` reacts to `a`.
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub a: CollisionObject,
    pub b: CollisionObject,
}

/// Global observer that logs every collision notification.
///
/// Entities with a [`Group`] are logged by name.
pub fn observe_log_collision(trigger: On<CollisionEvent>, groups: Query<&Group>) {
    let event = trigger.event();
    let label = |e: Entity| {
        groups
            .get(e)
            .map(|g| g.name().to_string())
            .unwrap_or_else(|_| format!("{e:?}"))
    };
    info!(
        "Collision: {} -> {}",
        label(event.a.entity),
        label(event.b.entity)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource, Default)]
    struct Seen(Vec<(Entity, Entity)>);

    #[test]
    fn new_snapshot_starts_visitable() {
        let mut world = World::new();
        let e = world.spawn_empty().id();
        let obj = CollisionObject::new(e, Aabb::new(1.0, 1.0, 3.0, 3.0));
        assert_eq!(obj.entity, e);
        assert_eq!(obj.world_aabb, Aabb::new(1.0, 1.0, 3.0, 3.0));
        assert!(obj.enabled);
    }

    #[test]
    fn event_reaches_observers_in_pair_order() {
        let mut world = World::new();
        world.init_resource::<Seen>();
        world.add_observer(|trigger: On<CollisionEvent>, mut seen: ResMut<Seen>| {
            let event = trigger.event();
            seen.0.push((event.a.entity, event.b.entity));
        });
        world.flush();

        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        world.trigger(CollisionEvent {
            a: CollisionObject::new(a, Aabb::default()),
            b: CollisionObject::new(b, Aabb::default()),
        });

        assert_eq!(world.resource::<Seen>().0, vec![(a, b)]);
    }
}
