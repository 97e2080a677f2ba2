//! Data-driven scenes for the headless driver.
//!
//! A scene is a JSON file listing collidable entities. [`SceneData::spawn`]
//! creates one entity per entry with [`Group`], [`MapPosition`], [`Collision`]
//! and, when a velocity is given, [`RigidBody`].
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "cooldown": 0.5,
//!   "entities": [
//!     { "group": "player", "x": 0.0, "y": 0.0, "bbox": [0, 0, 10, 10],
//!       "kind": 1, "mask": 2, "velocity": [20.0, 0.0] },
//!     { "group": "arena", "x": 0.0, "y": 0.0, "bbox": [-50, -50, 50, 50],
//!       "kind": 4, "mask": 1, "reversed": true }
//!   ]
//! }
//! ```
//!
//! `cooldown`, when present, makes [`observe_cooldown`] suppress each pair
//! for that many seconds after it fires.

use std::path::Path;

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::info;
use serde::{Deserialize, Serialize};

use crate::aabb::Aabb;
use crate::components::collision::Collision;
use crate::components::group::Group;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::components::scale::Scale;
use crate::events::collision::CollisionEvent;
use crate::resources::collisionsuppression::CollisionSuppression;

/// Scene file contents.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SceneData {
    /// Seconds a pair stays suppressed after firing.
    #[serde(default)]
    pub cooldown: Option<f32>,
    pub entities: Vec<SceneEntity>,
}

/// One collidable entity in a scene.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SceneEntity {
    pub group: String,
    pub x: f32,
    pub y: f32,
    /// Local box as `[min_x, min_y, max_x, max_y]`.
    pub bbox: [f32; 4],
    #[serde(default = "default_kind")]
    pub kind: u32,
    #[serde(default = "default_mask")]
    pub mask: u32,
    #[serde(default)]
    pub reversed: bool,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub velocity: Option<[f32; 2]>,
    #[serde(default)]
    pub rotation: Option<f32>,
    #[serde(default)]
    pub scale: Option<[f32; 2]>,
}

fn default_kind() -> u32 {
    1
}

fn default_mask() -> u32 {
    u32::MAX
}

fn default_enabled() -> bool {
    true
}

/// Suppression applied by [`observe_cooldown`] after each notification.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SceneCooldown(pub f32);

impl SceneData {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scene {}: {}", path.display(), e))?;
        Self::load_from_str(&text)
    }

    pub fn load_from_str(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("Failed to parse scene: {}", e))
    }

    /// Spawn every entity in order and install the cooldown, if any.
    pub fn spawn(&self, world: &mut World) -> Vec<Entity> {
        if let Some(cooldown) = self.cooldown {
            world.insert_resource(SceneCooldown(cooldown));
        }

        let spawned: Vec<Entity> = self
            .entities
            .iter()
            .map(|data| {
                let [min_x, min_y, max_x, max_y] = data.bbox;
                let mut collision = Collision::new(Aabb::new(min_x, min_y, max_x, max_y))
                    .with_kind(data.kind)
                    .with_mask(data.mask)
                    .with_enabled(data.enabled);
                if data.reversed {
                    collision = collision.reversed();
                }

                let mut entity = world.spawn((
                    Group::new(&data.group),
                    MapPosition::new(data.x, data.y),
                    collision,
                ));
                if let Some([vx, vy]) = data.velocity {
                    entity.insert(RigidBody::with_velocity(Vec2::new(vx, vy)));
                }
                if let Some(degrees) = data.rotation {
                    entity.insert(Rotation { degrees });
                }
                if let Some([sx, sy]) = data.scale {
                    entity.insert(Scale::new(sx, sy));
                }
                entity.id()
            })
            .collect();

        info!("Spawned scene with {} entities", spawned.len());
        spawned
    }

    /// Built-in scene used when no file is given: a player crossing an enemy
    /// inside a reversed arena boundary.
    pub fn builtin() -> Self {
        let entity = |group: &str, x, y, bbox, kind, mask| SceneEntity {
            group: group.to_string(),
            x,
            y,
            bbox,
            kind,
            mask,
            reversed: false,
            enabled: true,
            velocity: None,
            rotation: None,
            scale: None,
        };

        let mut player = entity("player", -40.0, 0.0, [0.0, 0.0, 10.0, 10.0], 1, 2);
        player.velocity = Some([40.0, 0.0]);
        let enemy = entity("enemy", 0.0, 0.0, [0.0, 0.0, 10.0, 10.0], 2, 1);
        let mut arena = entity("arena", 0.0, 0.0, [-50.0, -50.0, 60.0, 60.0], 4, 1);
        arena.reversed = true;

        Self {
            cooldown: Some(0.5),
            entities: vec![player, enemy, arena],
        }
    }
}

/// Suppress the pair that just fired for [`SceneCooldown`] seconds.
pub fn observe_cooldown(
    trigger: On<CollisionEvent>,
    cooldown: Option<Res<SceneCooldown>>,
    mut suppression: ResMut<CollisionSuppression>,
) {
    let Some(cooldown) = cooldown else {
        return;
    };
    let event = trigger.event();
    suppression.disable(event.a.entity, event.b.entity, cooldown.0);
}
