//! # Systems

use glam::Mat4;
use nohash::IntMap;

use crate::ComponentId;
use crate::GameObjectManager;
use crate::Transformation;

/// Computes the world matrix of every [Transformation] in the scene. A transformation without a
/// parent transformation is relative to the world origin.
pub fn compute_world_transforms(scene: &mut GameObjectManager) {
    let mut order = Vec::with_capacity(scene.len());
    scene.traverse_game_objects_pre_order(|node| {
        order.push(node);
        true
    });

    let mut world_matrices: IntMap<ComponentId, Mat4> = IntMap::default();
    for node in order {
        let Some(id) = scene.find_component::<Transformation>(node) else {
            continue;
        };

        if let Some(transformation) = scene.component_mut::<Transformation>(id) {
            let parent_matrix = transformation
                .parent()
                .and_then(|parent| world_matrices.get(&parent))
                .copied()
                .unwrap_or(Mat4::IDENTITY);
            let matrix = parent_matrix * transformation.local_matrix();
            transformation.set_world_matrix(matrix);
            world_matrices.insert(id, matrix);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn compute_world_transforms_world_matrix_returns_composed_translation() {
        let mut scene = GameObjectManager::new();
        let parent = scene.create_game_object("parent");
        scene
            .add_component(parent, Transformation::from_position(Vec3::X))
            .unwrap();
        let child = scene.create_child(parent, "child").unwrap();
        scene
            .add_component(child, Transformation::from_position(Vec3::Y))
            .unwrap();

        compute_world_transforms(&mut scene);

        assert_eq!(
            scene
                .get_component::<Transformation>(child)
                .map(Transformation::world_matrix),
            Some(Mat4::from_translation(Vec3::new(1.0, 1.0, 0.0)))
        );
    }

    #[test]
    fn compute_world_transforms_parent_without_transformation_returns_local() {
        let mut scene = GameObjectManager::new();
        let parent = scene.create_game_object("parent");
        let child = scene.create_child(parent, "child").unwrap();
        scene
            .add_component(child, Transformation::from_position(Vec3::Z))
            .unwrap();

        compute_world_transforms(&mut scene);

        assert_eq!(
            scene
                .get_component::<Transformation>(child)
                .map(Transformation::world_matrix),
            Some(Mat4::from_translation(Vec3::Z))
        );
    }

    #[test]
    fn compute_world_transforms_after_make_root_drops_parent_offset() {
        let mut scene = GameObjectManager::new();
        let parent = scene.create_game_object("parent");
        scene
            .add_component(parent, Transformation::from_position(Vec3::X))
            .unwrap();
        let child = scene.create_child(parent, "child").unwrap();
        scene
            .add_component(child, Transformation::from_position(Vec3::Y))
            .unwrap();

        scene.make_root(child).unwrap();
        compute_world_transforms(&mut scene);

        assert_eq!(
            scene
                .get_component::<Transformation>(child)
                .map(Transformation::world_matrix),
            Some(Mat4::from_translation(Vec3::Y))
        );
    }
}
