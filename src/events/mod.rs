//! Event types and observers used by the engine.
//!
//! Submodules:
//! - [`collision`] – collision notifications emitted by the collision pass
pub mod collision;
