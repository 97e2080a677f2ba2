//! Collision detection and response notification.
//!
//! One call to [`update_collision`] runs a full tick:
//!
//! 1. Advance the [`CollisionSuppression`] timers and drop entries whose
//!    entities are gone.
//! 2. Gather a [`CollisionObject`] snapshot (entity and world box) for every
//!    entity with an enabled [`Collision`] and a [`MapPosition`].
//! 3. Test every ordered pair `(i, j)`, `i != j`, in gather order and trigger a
//!    [`CollisionEvent`] for each qualifying pair.
//!
//! # Re-entrancy
//!
//! Observers and [`CollisionReaction`]s run inline and the world is flushed
//! right after, so despawns and disabled collisions take effect for the rest
//! of the pass. An object whose entity dies or whose collision gets disabled
//! is marked off in the snapshot list and never tested again this tick; if it
//! was the reacting side `i`, its remaining partners are skipped.
//!
//! # Complexity
//!
//! O(n²) over gathered objects. There is no broad phase.
//!
//! # Schedule position
//!
//! Run after movement/transform systems so world positions are current.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, error, info, trace};
use thiserror::Error;

use crate::components::collision::Collision;
use crate::components::collisionreaction::CollisionReaction;
use crate::components::mapposition::MapPosition;
use crate::components::rotation::Rotation;
use crate::components::scale::Scale;
use crate::events::collision::{CollisionEvent, CollisionObject};
use crate::resources::collisionsettings::{BoundsMode, CollisionSettings};
use crate::resources::collisionstats::CollisionStats;
use crate::resources::collisionsuppression::CollisionSuppression;
use crate::resources::worldtime::WorldTime;

/// Errors surfaced by the collision subsystem. Per-tick absences (dead
/// entities, missing transforms, disabled components) are never errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollisionError {
    #[error("collision subsystem is not initialized, call setup_collision first")]
    NotInitialized,
    #[error("collision subsystem is already initialized")]
    AlreadyInitialized,
    #[error("collision config error: {0}")]
    Config(String),
}

/// Initialize the collision subsystem with default settings.
pub fn setup_collision(world: &mut World) -> Result<(), CollisionError> {
    setup_collision_with(world, CollisionSettings::default())
}

/// Initialize the collision subsystem.
///
/// Declares the [`MapPosition`] and [`Collision`] components and installs the
/// suppression table, settings and stats resources. Fails if called twice on
/// the same world.
pub fn setup_collision_with(
    world: &mut World,
    settings: CollisionSettings,
) -> Result<(), CollisionError> {
    if world.contains_resource::<CollisionSuppression>() {
        return Err(CollisionError::AlreadyInitialized);
    }

    world.register_component::<MapPosition>();
    world.register_component::<Collision>();

    info!("Collision subsystem ready (bounds: {:?})", settings.bounds);
    world.insert_resource(settings);
    world.insert_resource(CollisionStats::default());
    world.insert_resource(CollisionSuppression::default());
    Ok(())
}

fn ensure_initialized(world: &World) -> Result<(), CollisionError> {
    if world.contains_resource::<CollisionSuppression>()
        && world.contains_resource::<CollisionSettings>()
        && world.contains_resource::<CollisionStats>()
    {
        Ok(())
    } else {
        Err(CollisionError::NotInitialized)
    }
}

/// Run one collision tick: advance suppression by `elapsed` seconds, gather,
/// resolve. The returned stats are also stored in [`CollisionStats`].
pub fn update_collision(world: &mut World, elapsed: f32) -> Result<CollisionStats, CollisionError> {
    ensure_initialized(world)?;

    let suppressed_pairs = advance_suppression(world, elapsed);
    let mut objects = gather_collision_objects(world);
    let mut stats = resolve_collisions(world, &mut objects);
    stats.suppressed_pairs = suppressed_pairs;

    debug!(
        "Collision pass: {} objects, {} pairs tested, {} dispatched, {} suppressed pairs",
        stats.gathered, stats.tested, stats.dispatched, stats.suppressed_pairs
    );
    *world.resource_mut::<CollisionStats>() = stats;
    Ok(stats)
}

/// Withhold notifications for `(source, target)`. See
/// [`CollisionSuppression::disable`].
pub fn disable_collision_response(
    world: &mut World,
    source: Entity,
    target: Entity,
    duration: f32,
) -> Result<(), CollisionError> {
    let mut table = world
        .get_resource_mut::<CollisionSuppression>()
        .ok_or(CollisionError::NotInitialized)?;
    table.disable(source, target, duration);
    Ok(())
}

/// Exclusive system driving [`update_collision`] with the scaled
/// [`WorldTime::delta`].
pub fn collision_system(world: &mut World) {
    let dt = world
        .get_resource::<WorldTime>()
        .map(|t| t.delta)
        .unwrap_or(0.0);
    if let Err(e) = update_collision(world, dt) {
        error!("Collision pass skipped: {e}");
    }
}

/// Entity registry check: does the handle still refer to a live entity.
pub fn is_entity_valid(world: &World, entity: Entity) -> bool {
    world.get_entity(entity).is_ok()
}

/// Live entity with an enabled collision component.
fn is_collision_live(world: &World, entity: Entity) -> bool {
    world.get::<Collision>(entity).is_some_and(|c| c.enabled)
}

fn advance_suppression(world: &mut World, elapsed: f32) -> usize {
    world.resource_scope(|world, mut table: Mut<CollisionSuppression>| {
        let world: &World = world;
        table.advance(elapsed, |e| is_entity_valid(world, e));
        table.len()
    })
}

/// Snapshot every enabled collider that has a position, in query order.
///
/// World boxes follow [`CollisionSettings::bounds`]; without the settings
/// resource the legacy translate-only mode is used.
pub fn gather_collision_objects(world: &mut World) -> Vec<CollisionObject> {
    let bounds = world
        .get_resource::<CollisionSettings>()
        .map(|s| s.bounds)
        .unwrap_or_default();

    let mut query = world.query::<(
        Entity,
        &Collision,
        Option<&MapPosition>,
        Option<&Rotation>,
        Option<&Scale>,
    )>();

    let mut objects = Vec::new();
    for (entity, collision, position, rotation, scale) in query.iter(world) {
        if !collision.enabled {
            continue;
        }
        let Some(position) = position else {
            trace!("Skipping {entity:?}: collision without MapPosition");
            continue;
        };

        let world_aabb = match bounds {
            BoundsMode::Translate => collision
                .bounding_box
                .translate(position.world_position()),
            BoundsMode::Affine => collision.bounding_box.transformed(
                position.world_position(),
                rotation.map_or(0.0, |r| r.degrees),
                scale.map_or(Vec2::ONE, |s| s.scale),
            ),
        };
        objects.push(CollisionObject::new(entity, world_aabb));
    }
    objects
}

/// Test all ordered pairs of `objects` and dispatch notifications.
///
/// Only world boxes come from the snapshots. Type, mask and flags are read
/// from the live [`Collision`] for every pair. Visit flags in `objects` are
/// cleared as entities die or get disabled during dispatch. The suppression table is read live, so handlers adding
/// suppression affect later pairs of the same pass.
pub fn resolve_collisions(world: &mut World, objects: &mut [CollisionObject]) -> CollisionStats {
    let mut stats = CollisionStats {
        gathered: objects.len(),
        ..Default::default()
    };

    for i in 0..objects.len() {
        if !objects[i].enabled {
            continue;
        }

        for j in 0..objects.len() {
            if i == j {
                continue;
            }
            if !objects[j].enabled {
                continue;
            }

            let (a, b) = (objects[i], objects[j]);
            let suppressed = world
                .get_resource::<CollisionSuppression>()
                .is_some_and(|t| t.is_suppressed(a.entity, b.entity));
            if suppressed {
                continue;
            }
            // Filter data is read live: handlers may have changed it.
            let (Some(live_a), Some(live_b)) = (
                world.get::<Collision>(a.entity),
                world.get::<Collision>(b.entity),
            ) else {
                continue;
            };
            if !live_a.reacts_to(live_b.kind) {
                continue;
            }
            let reversed = live_a.is_reversed();

            stats.tested += 1;
            let intersects = a.world_aabb.overlaps(&b.world_aabb);
            if intersects == reversed {
                continue;
            }

            dispatch(world, a, b);
            stats.dispatched += 1;

            if !is_collision_live(world, b.entity) {
                objects[j].enabled = false;
            }
            if !is_collision_live(world, a.entity) {
                objects[i].enabled = false;
                break;
            }
        }
    }
    stats
}

/// Deliver `(a, b)` to observers, then to `a`'s own reaction if it has one.
fn dispatch(world: &mut World, a: CollisionObject, b: CollisionObject) {
    trace!("Dispatching collision {:?} -> {:?}", a.entity, b.entity);
    world.trigger(CollisionEvent { a, b });
    world.flush();

    let reaction = world.get::<CollisionReaction>(a.entity).cloned();
    if let Some(reaction) = reaction {
        reaction.react(world, &a, &b);
        world.flush();
    }
}
