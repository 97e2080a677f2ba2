//! Collision response suppression table.
//!
//! [`CollisionSuppression`] remembers, per ordered entity pair, that
//! notifications from `source` towards `target` should be withheld for a
//! while or forever. It is advanced once per tick by
//! [`update_collision`](crate::systems::collision::update_collision) before the
//! pass reads it.
//!
//! # Ordering
//!
//! Pairs are ordered: suppressing `(a, b)` leaves `(b, a)` untouched. Call
//! [`CollisionSuppression::disable`] twice to silence both directions.
//!
//! # Usage
//!
//! ```ignore
//! // From an observer: ignore the same enemy for half a second.
//! fn on_hit(trigger: On<CollisionEvent>, mut suppression: ResMut<CollisionSuppression>) {
//!     let e = trigger.event();
//!     suppression.disable(e.a.entity, e.b.entity, 0.5);
//! }
//! ```

use bevy_ecs::prelude::*;
use log::trace;
use rustc_hash::FxHashMap;

/// Duration sentinel meaning "suppress forever".
pub const PERMANENT: f32 = -1.0;

/// Ordered `(source, target)` key of the suppression table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityPair {
    pub source: Entity,
    pub target: Entity,
}

impl EntityPair {
    pub fn new(source: Entity, target: Entity) -> Self {
        Self { source, target }
    }

    /// The same pair seen from the other side.
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target,
            target: self.source,
        }
    }
}

/// Remaining suppression time per ordered entity pair.
///
/// Negative values are permanent. A value never sits at zero between ticks:
/// entries reaching zero are dropped in the same [`advance`](Self::advance).
#[derive(Resource, Debug, Default, Clone)]
pub struct CollisionSuppression {
    entries: FxHashMap<EntityPair, f32>,
}

impl CollisionSuppression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Withhold notifications for `(source, target)` for `duration` seconds,
    /// or forever with [`PERMANENT`] (any negative value counts as permanent).
    ///
    /// Only ever extends: a longer or permanent existing entry is kept.
    /// Zero and NaN durations are ignored. Handles are not validated here;
    /// dead ones are pruned on the next advance.
    pub fn disable(&mut self, source: Entity, target: Entity, duration: f32) {
        if duration.is_nan() || duration == 0.0 {
            return;
        }
        let duration = if duration < 0.0 { PERMANENT } else { duration };
        let pair = EntityPair::new(source, target);

        match self.entries.get_mut(&pair) {
            Some(remaining) if *remaining < 0.0 => {}
            Some(remaining) => {
                if duration < 0.0 || *remaining < duration {
                    *remaining = duration;
                }
            }
            None => {
                self.entries.insert(pair, duration);
            }
        }
    }

    /// Remove any suppression of `(source, target)`, permanent ones
    /// included. Returns whether an entry existed.
    pub fn enable(&mut self, source: Entity, target: Entity) -> bool {
        self.entries
            .remove(&EntityPair::new(source, target))
            .is_some()
    }

    /// Exact lookup of the ordered pair. The reverse pair is not consulted.
    pub fn is_suppressed(&self, source: Entity, target: Entity) -> bool {
        self.entries
            .contains_key(&EntityPair::new(source, target))
    }

    /// Remaining time for the pair, negative when permanent.
    pub fn remaining(&self, source: Entity, target: Entity) -> Option<f32> {
        self.entries
            .get(&EntityPair::new(source, target))
            .copied()
    }

    /// Advance timers by `elapsed` seconds.
    ///
    /// - Entries naming an entity for which `is_valid` returns false are
    ///   removed, permanent ones included.
    /// - Timed entries count down, floored at zero, and are removed when
    ///   they reach zero.
    /// - Permanent entries are left alone.
    pub fn advance(&mut self, elapsed: f32, is_valid: impl Fn(Entity) -> bool) {
        self.entries.retain(|pair, remaining| {
            if !is_valid(pair.source) || !is_valid(pair.target) {
                trace!("Dropping suppression {pair:?}: entity no longer valid");
                return false;
            }
            if *remaining < 0.0 {
                return true;
            }
            *remaining = (*remaining - elapsed).max(0.0);
            *remaining != 0.0
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn two_entities() -> (World, Entity, Entity) {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        (world, a, b)
    }

    #[test]
    fn disable_inserts_new_entry() {
        let (_world, a, b) = two_entities();
        let mut table = CollisionSuppression::new();
        table.disable(a, b, 2.0);
        assert!(table.is_suppressed(a, b));
        assert!(approx_eq(table.remaining(a, b).unwrap(), 2.0));
    }

    #[test]
    fn disable_only_extends() {
        let (_world, a, b) = two_entities();
        let mut table = CollisionSuppression::new();
        table.disable(a, b, 5.0);
        table.disable(a, b, 2.0);
        assert!(approx_eq(table.remaining(a, b).unwrap(), 5.0));
        table.disable(a, b, 7.5);
        assert!(approx_eq(table.remaining(a, b).unwrap(), 7.5));
    }

    #[test]
    fn permanent_overrides_timed_and_sticks() {
        let (_world, a, b) = two_entities();
        let mut table = CollisionSuppression::new();
        table.disable(a, b, 5.0);
        table.disable(a, b, PERMANENT);
        assert!(table.remaining(a, b).unwrap() < 0.0);
        table.disable(a, b, 100.0);
        assert!(table.remaining(a, b).unwrap() < 0.0);
    }

    #[test]
    fn any_negative_duration_is_permanent() {
        let (_world, a, b) = two_entities();
        let mut table = CollisionSuppression::new();
        table.disable(a, b, -3.0);
        assert!(approx_eq(table.remaining(a, b).unwrap(), PERMANENT));
    }

    #[test]
    fn zero_and_nan_durations_are_ignored() {
        let (_world, a, b) = two_entities();
        let mut table = CollisionSuppression::new();
        table.disable(a, b, 0.0);
        table.disable(a, b, f32::NAN);
        assert!(table.is_empty());
    }

    #[test]
    fn pairs_are_ordered() {
        let (_world, a, b) = two_entities();
        let mut table = CollisionSuppression::new();
        table.disable(a, b, PERMANENT);
        assert!(table.is_suppressed(a, b));
        assert!(!table.is_suppressed(b, a));
        assert_eq!(EntityPair::new(a, b).reversed(), EntityPair::new(b, a));
    }

    #[test]
    fn advance_expires_in_same_call() {
        let (world, a, b) = two_entities();
        let mut table = CollisionSuppression::new();
        table.disable(a, b, 1.0);
        table.advance(1.0, |e| world.get_entity(e).is_ok());
        assert!(!table.is_suppressed(a, b));
        assert!(table.is_empty());
    }

    #[test]
    fn advance_floors_overshoot_and_removes() {
        let (world, a, b) = two_entities();
        let mut table = CollisionSuppression::new();
        table.disable(a, b, 0.25);
        table.advance(10.0, |e| world.get_entity(e).is_ok());
        assert!(table.is_empty());
    }

    #[test]
    fn advance_counts_down_timed_entries() {
        let (world, a, b) = two_entities();
        let mut table = CollisionSuppression::new();
        table.disable(a, b, 3.0);
        table.disable(b, a, PERMANENT);
        table.advance(1.0, |e| world.get_entity(e).is_ok());
        assert!(approx_eq(table.remaining(a, b).unwrap(), 2.0));
        assert!(approx_eq(table.remaining(b, a).unwrap(), PERMANENT));
    }

    #[test]
    fn advance_prunes_stale_handles_even_when_permanent() {
        let (mut world, a, b) = two_entities();
        let c = world.spawn_empty().id();
        let mut table = CollisionSuppression::new();
        table.disable(a, b, PERMANENT);
        table.disable(c, a, 50.0);
        world.despawn(b);
        table.advance(0.0, |e| world.get_entity(e).is_ok());
        assert!(!table.is_suppressed(a, b));
        assert!(table.is_suppressed(c, a));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn enable_removes_permanent_entry() {
        let (_world, a, b) = two_entities();
        let mut table = CollisionSuppression::new();
        table.disable(a, b, PERMANENT);
        assert!(table.enable(a, b));
        assert!(!table.is_suppressed(a, b));
        assert!(!table.enable(a, b));
    }
}
