//! Engine systems.
//!
//! Submodules overview
//! - [`collision`] – setup, suppression advance, gather and pairwise resolve
//! - [`movement`] – integrate positions from rigid body velocities and time
//! - [`time`] – update simulation time and delta

pub mod collision;
pub mod movement;
pub mod time;
