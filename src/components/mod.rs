//! ECS components for entities.
//!
//! Submodules overview:
//! - [`collision`] – collision capability: local box, type bits, mask, flags
//! - [`collisionreaction`] – optional per-entity collision response callback
//! - [`group`] – name tag for entities
//! - [`mapposition`] – world-space position, the transform capability
//! - [`rigidbody`] – constant velocity for moving colliders
//! - [`rotation`] – rotation angle in degrees
//! - [`scale`] – 2D scale factor

pub mod collision;
pub mod collisionreaction;
pub mod group;
pub mod mapposition;
pub mod rigidbody;
pub mod rotation;
pub mod scale;
