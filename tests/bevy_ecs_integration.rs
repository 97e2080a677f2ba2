//! Bevy ECS Integration Tests
//!
//! These tests pin the bevy_ecs behaviors the collision pass is built on.
//! They serve as a compatibility layer to detect breaking changes when
//! upgrading bevy_ecs versions.
//!
//! # Test Categories
//!
//! 1. **Entity registry** - Validity of live, despawned and reused handles
//! 2. **Component storage** - Query order, optional terms, resource_scope
//! 3. **Event bus** - Observer immediacy, ordering, command flushing
//!
//! # Usage
//!
//! ```sh
//! cargo test --test bevy_ecs_integration
//! ```

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use std::sync::{Arc, Mutex};

// =============================================================================
// Test Components, Resources, and Events
// =============================================================================

#[derive(Component, Debug, Clone, PartialEq)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Component, Debug, Clone, PartialEq)]
struct Hitbox {
    enabled: bool,
}

#[derive(Resource, Debug, Default)]
struct Counter(i32);

#[derive(Event, Debug, Clone)]
struct HitEvent {
    a: Entity,
    b: Entity,
}

#[derive(Event, Debug, Clone)]
struct SimpleEvent(i32);

// =============================================================================
// CATEGORY 1: Entity Registry Tests
// =============================================================================

#[test]
fn despawned_entity_is_invalid() {
    let mut world = World::new();
    let entity = world.spawn(Position { x: 0.0, y: 0.0 }).id();
    assert!(world.get_entity(entity).is_ok());

    world.despawn(entity);

    assert!(world.get_entity(entity).is_err());
    assert!(world.get::<Position>(entity).is_none());
}

#[test]
fn reused_slot_does_not_revive_old_handle() {
    let mut world = World::new();
    let old = world.spawn(Position { x: 0.0, y: 0.0 }).id();
    world.despawn(old);

    let new = world.spawn(Position { x: 1.0, y: 1.0 }).id();

    assert_ne!(old, new);
    assert!(world.get_entity(old).is_err());
    assert!(world.get_entity(new).is_ok());
}

// =============================================================================
// CATEGORY 2: Component Storage Tests
// =============================================================================

#[test]
fn query_iterates_same_archetype_in_spawn_order() {
    let mut world = World::new();
    let ids: Vec<Entity> = (0..5)
        .map(|i| world.spawn(Position { x: i as f32, y: 0.0 }).id())
        .collect();

    let mut query = world.query::<(Entity, &Position)>();
    let seen: Vec<Entity> = query.iter(&world).map(|(e, _)| e).collect();

    assert_eq!(seen, ids);
}

#[test]
fn query_optional_component() {
    let mut world = World::new();
    world.spawn((Hitbox { enabled: true }, Position { x: 1.0, y: 2.0 }));
    world.spawn((Hitbox { enabled: true },));

    let mut query = world.query::<(&Hitbox, Option<&Position>)>();
    let with_position = query.iter(&world).filter(|(_, p)| p.is_some()).count();
    let without_position = query.iter(&world).filter(|(_, p)| p.is_none()).count();

    assert_eq!(with_position, 1);
    assert_eq!(without_position, 1);
}

#[test]
fn world_resource_scope() {
    let mut world = World::new();
    world.insert_resource(Counter(10));
    let entity = world.spawn_empty().id();

    world.resource_scope(|world, mut counter: Mut<Counter>| {
        if world.get_entity(entity).is_ok() {
            counter.0 += 1;
        }
        assert!(!world.contains_resource::<Counter>());
    });

    assert_eq!(world.resource::<Counter>().0, 11);
}

// =============================================================================
// CATEGORY 3: Event Bus Tests
// =============================================================================

#[test]
fn observer_runs_before_trigger_returns() {
    let mut world = World::new();

    let event_received = Arc::new(Mutex::new(false));
    let event_received_clone = event_received.clone();

    world.add_observer(move |_trigger: On<SimpleEvent>| {
        *event_received_clone.lock().unwrap() = true;
    });
    world.flush();

    world.trigger(SimpleEvent(42));

    assert!(*event_received.lock().unwrap());
}

#[test]
fn observer_with_entity_context() {
    let mut world = World::new();

    let entity_ids = Arc::new(Mutex::new(Vec::new()));
    let entity_ids_clone = entity_ids.clone();

    world.add_observer(move |trigger: On<HitEvent>| {
        let event = trigger.event();
        entity_ids_clone.lock().unwrap().push(event.a);
        entity_ids_clone.lock().unwrap().push(event.b);
    });
    world.flush();

    let e1 = world.spawn_empty().id();
    let e2 = world.spawn_empty().id();

    world.trigger(HitEvent { a: e1, b: e2 });

    let ids = entity_ids.lock().unwrap();
    assert_eq!(ids.as_slice(), &[e1, e2]);
}

#[test]
fn observer_query_mutation_is_immediate() {
    let mut world = World::new();
    world.add_observer(
        |trigger: On<HitEvent>, mut hitboxes: Query<&mut Hitbox>| {
            if let Ok(mut hitbox) = hitboxes.get_mut(trigger.event().a) {
                hitbox.enabled = false;
            }
        },
    );
    world.flush();

    let a = world.spawn(Hitbox { enabled: true }).id();
    let b = world.spawn(Hitbox { enabled: true }).id();
    world.trigger(HitEvent { a, b });

    assert!(!world.get::<Hitbox>(a).unwrap().enabled);
    assert!(world.get::<Hitbox>(b).unwrap().enabled);
}

#[test]
fn observer_commands_apply_after_flush() {
    let mut world = World::new();
    world.add_observer(|trigger: On<HitEvent>, mut commands: Commands| {
        commands.entity(trigger.event().b).despawn();
    });
    world.flush();

    let a = world.spawn_empty().id();
    let b = world.spawn_empty().id();
    world.trigger(HitEvent { a, b });
    world.flush();

    assert!(world.get_entity(a).is_ok());
    assert!(world.get_entity(b).is_err());
}

#[test]
fn observer_resource_mutation_is_visible() {
    let mut world = World::new();
    world.init_resource::<Counter>();
    world.add_observer(|trigger: On<SimpleEvent>, mut counter: ResMut<Counter>| {
        counter.0 += trigger.event().0;
    });
    world.flush();

    world.trigger(SimpleEvent(3));
    world.trigger(SimpleEvent(4));

    assert_eq!(world.resource::<Counter>().0, 7);
}

#[test]
fn observer_multiple_observers_same_event() {
    let mut world = World::new();

    let counter1 = Arc::new(Mutex::new(0));
    let counter2 = Arc::new(Mutex::new(0));
    let c1 = counter1.clone();
    let c2 = counter2.clone();

    world.add_observer(move |_trigger: On<SimpleEvent>| {
        *c1.lock().unwrap() += 1;
    });
    world.add_observer(move |_trigger: On<SimpleEvent>| {
        *c2.lock().unwrap() += 10;
    });
    world.flush();

    world.trigger(SimpleEvent(0));

    assert_eq!(*counter1.lock().unwrap(), 1);
    assert_eq!(*counter2.lock().unwrap(), 10);
}

#[test]
fn exclusive_system_in_schedule() {
    fn bump(world: &mut World) {
        world.resource_mut::<Counter>().0 += 1;
    }

    let mut world = World::new();
    world.init_resource::<Counter>();

    let mut schedule = Schedule::default();
    schedule.add_systems(bump);
    schedule.run(&mut world);
    schedule.run(&mut world);

    assert_eq!(world.resource::<Counter>().0, 2);
}
