//! Axis-aligned bounding box math.
//!
//! [`Aabb`] is the only shape the collision pass understands. Boxes are kept
//! normalized (`min <= max` on both axes) so the overlap test can rely on it.
//!
//! The legacy world-space transform only translates a local box by the
//! entity position ([`Aabb::translate`]). [`Aabb::transformed`] additionally
//! applies scale and rotation to all four corners and re-derives the enclosing
//! box; it is opt-in through
//! [`BoundsMode::Affine`](crate::resources::collisionsettings::BoundsMode).

use glam::Vec2;

/// Axis-aligned rectangle described by its min and max corners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Create a box from its four scalars in `(min_x, min_y, max_x, max_y)`
    /// order. Swapped coordinates are normalized.
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self::from_corners(Vec2::new(min_x, min_y), Vec2::new(max_x, max_y))
    }

    /// Create a box from two opposite corners in any order.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box of the given size with its min corner at the origin.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Returns the box moved by `offset`.
    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Closed-interval overlap test. Boxes sharing only an edge or a corner
    /// overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.min.x > other.max.x
            || self.max.x < other.min.x
            || self.min.y > other.max.y
            || self.max.y < other.min.y)
    }

    /// Point containment, edges included.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Scale, rotate and translate all four corners, then return the box
    /// enclosing them.
    pub fn transformed(&self, position: Vec2, rotation_degrees: f32, scale: Vec2) -> Self {
        let rotation = Vec2::from_angle(rotation_degrees.to_radians());
        let corners = [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ];

        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        for corner in corners {
            let world = rotation.rotate(corner * scale) + position;
            min = min.min(world);
            max = max.max(world);
        }
        Self { min, max }
    }
}
