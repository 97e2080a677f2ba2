//! Aberred Collision library.
//!
//! Collision detection and response notification for the Aberred engine's
//! ECS: components, resources, systems and events for the per-tick collision
//! pass and the pair suppression table.

pub mod aabb;
pub mod components;
pub mod events;
pub mod resources;
pub mod scene;
pub mod systems;
