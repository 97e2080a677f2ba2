use bevy_ecs::prelude::Component;

/// Rotation angle in degrees. Only read by the affine bounds mode.
#[derive(Component, Clone, Debug, Copy, Default)]
pub struct Rotation {
    pub degrees: f32,
}
