//! Per-tick collision diagnostics.
use bevy_ecs::prelude::*;

/// Counters describing the last collision pass. Overwritten every update.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    /// Objects gathered into the pass.
    pub gathered: usize,
    /// Ordered pairs that reached the overlap test.
    pub tested: usize,
    /// Notifications dispatched.
    pub dispatched: usize,
    /// Suppression entries alive after advancing.
    pub suppressed_pairs: usize,
}
