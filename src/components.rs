use glam::Mat4;
use glam::Quat;
use glam::Vec3;

use crate::Component;
use crate::ComponentId;

/// # Transformation
///
/// Position, rotation, and scale of the game object relative to its parent's transformation. The
/// scene keeps [Transformation::parent] in sync with the game object tree.
#[derive(Debug, PartialEq)]
pub struct Transformation {
    /// Position of the transform.
    pub position: Vec3,
    /// Rotation of the transform.
    pub rotation: Quat,
    /// Scale of the transform.
    pub scale: Vec3,
    parent: Option<ComponentId>,
    world_matrix: Mat4,
}

impl Transformation {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
        parent: None,
        world_matrix: Mat4::IDENTITY,
    };

    /// Returns a transform with the given position, rotation, and scale.
    pub const fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
            ..Self::IDENTITY
        }
    }

    /// Returns a transform with the given position.
    pub const fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Returns the transformation of the parent game object, if it has one.
    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    /// Sets the parent transformation.
    pub fn set_parent(&mut self, parent: Option<ComponentId>) {
        self.parent = parent;
    }

    /// Returns the matrix relative to the parent transformation.
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Returns the world matrix computed by
    /// [compute_world_transforms](crate::systems::compute_world_transforms).
    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }

    pub(crate) fn set_world_matrix(&mut self, matrix: Mat4) {
        self.world_matrix = matrix;
    }
}

impl Component for Transformation {}

impl Default for Transformation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_position_local_matrix_returns_translation() {
        let transformation = Transformation::from_position(Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(
            transformation.local_matrix(),
            Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
        );
    }

    #[test]
    fn default_parent_returns_none() {
        assert_eq!(Transformation::default().parent(), None);
    }
}
