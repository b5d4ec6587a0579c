use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use log::debug;

use crate::component::ComponentSlot;
use crate::Component;
use crate::ComponentId;
use crate::GameObjectManager;
use crate::Result;
use crate::SceneError;
use crate::Transformation;

static ALLOCATOR: AtomicUsize = AtomicUsize::new(1);

/// # Game Object
///
/// Handle to a node of the scene tree. The node itself, its children and its components are owned
/// by the [GameObjectManager] that created it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GameObject {
    id: usize,
}

impl GameObject {
    pub(crate) fn new() -> Self {
        Self {
            id: ALLOCATOR.fetch_add(1, Ordering::Relaxed),
        }
    }
}

impl nohash::IsEnabled for GameObject {}

pub(crate) struct GameObjectData {
    pub(crate) name: String,
    pub(crate) parent: Option<GameObject>,
    pub(crate) children: Vec<GameObject>,
    pub(crate) components: Vec<ComponentSlot>,
}

impl GameObjectData {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            parent: None,
            children: Vec::new(),
            components: Vec::new(),
        }
    }
}

impl GameObjectManager {
    pub(crate) fn data(&self, node: GameObject) -> Result<&GameObjectData> {
        self.game_objects
            .get(&node)
            .ok_or(SceneError::UnknownGameObject(node))
    }

    pub(crate) fn data_mut(&mut self, node: GameObject) -> Result<&mut GameObjectData> {
        self.game_objects
            .get_mut(&node)
            .ok_or(SceneError::UnknownGameObject(node))
    }

    /// Fails unless the node exists and neither it nor any of its ancestors is queued for
    /// destruction.
    fn ensure_mutable(&self, node: GameObject) -> Result<()> {
        let mut current = Some(node);
        while let Some(object) = current {
            if self.is_pending_destruction(object) {
                return Err(SceneError::PendingDestruction(object));
            }

            current = self.data(object)?.parent;
        }

        Ok(())
    }

    /// Returns the name of the game object.
    pub fn name(&self, node: GameObject) -> Result<&str> {
        Ok(&self.data(node)?.name)
    }

    /// Renames the game object. Names don't have to be unique.
    pub fn set_name(&mut self, node: GameObject, name: impl Into<String>) -> Result<()> {
        self.ensure_mutable(node)?;
        self.data_mut(node)?.name = name.into();
        Ok(())
    }

    /// Returns the parent of the game object, or `None` for root game objects.
    pub fn parent(&self, node: GameObject) -> Result<Option<GameObject>> {
        Ok(self.data(node)?.parent)
    }

    /// Returns the children of the game object in insertion order.
    pub fn children(&self, node: GameObject) -> Result<&[GameObject]> {
        Ok(&self.data(node)?.children)
    }

    /// Returns the child at the given position.
    pub fn child(&self, node: GameObject, index: usize) -> Result<GameObject> {
        let children = &self.data(node)?.children;
        children
            .get(index)
            .copied()
            .ok_or(SceneError::ChildIndexOutOfRange {
                node,
                index,
                len: children.len(),
            })
    }

    /// Returns true if `ancestor` is found walking up the parents of `node`.
    pub fn is_ancestor_of(&self, ancestor: GameObject, node: GameObject) -> bool {
        let mut current = self.game_objects.get(&node).and_then(|data| data.parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }

            current = self.game_objects.get(&parent).and_then(|data| data.parent);
        }

        false
    }

    /// Appends `child` to the children of `parent`, detaching it from its previous parent or from
    /// the root set.
    pub fn add_child(&mut self, parent: GameObject, child: GameObject) -> Result<GameObject> {
        self.set_parent(child, Some(parent))?;
        Ok(child)
    }

    /// Creates a new game object as the last child of `parent`.
    pub fn create_child(
        &mut self,
        parent: GameObject,
        name: impl Into<String>,
    ) -> Result<GameObject> {
        self.ensure_mutable(parent)?;

        let child = self.insert_game_object(name.into());
        self.data_mut(parent)?.children.push(child);
        self.data_mut(child)?.parent = Some(parent);
        debug!("created {child:?} as child of {parent:?}");

        Ok(child)
    }

    /// Creates a new game object named after [SceneConfig::default_name](crate::SceneConfig) as
    /// the last child of `parent`.
    pub fn create_default_child(&mut self, parent: GameObject) -> Result<GameObject> {
        let name = self.config().default_name.clone();
        self.create_child(parent, name)
    }

    /// Queues `child` for destruction. The child stays in place until the next
    /// [GameObjectManager::update].
    pub fn remove_child(&mut self, parent: GameObject, child: GameObject) -> Result<()> {
        if !self.data(parent)?.children.contains(&child) {
            return Err(SceneError::NotAChild { parent, child });
        }

        self.shutdown_game_object(child)
    }

    /// Unlinks `child` from `parent` without registering it as a root.
    pub(crate) fn detach_child(&mut self, parent: GameObject, child: GameObject) {
        if let Some(data) = self.game_objects.get_mut(&parent) {
            data.children.retain(|node| *node != child);
        }

        if let Some(data) = self.game_objects.get_mut(&child) {
            data.parent = None;
        }
    }

    /// Moves the game object under `parent`, or into the root set when `parent` is `None`.
    /// Re-parenting to the current parent keeps the child's position.
    pub fn set_parent(&mut self, node: GameObject, parent: Option<GameObject>) -> Result<()> {
        self.ensure_mutable(node)?;
        if let Some(parent) = parent {
            self.ensure_mutable(parent)?;
            if parent == node {
                return Err(SceneError::SelfParenting(node));
            }
            if self.is_ancestor_of(node, parent) {
                return Err(SceneError::CyclicParenting { node, parent });
            }
        }

        let previous = self.data(node)?.parent;
        if previous == parent {
            return Ok(());
        }

        if let Some(previous) = previous {
            self.detach_child(previous, node);
        }

        match (previous, parent) {
            (Some(_), None) => self.add_root_game_object(node),
            (None, Some(_)) => self.remove_root_game_object(node),
            _ => {}
        }

        if let Some(parent) = parent {
            self.data_mut(parent)?.children.push(node);
        }
        self.data_mut(node)?.parent = parent;
        self.link_transformations(node);
        debug!("moved {node:?} from {previous:?} to {parent:?}");

        Ok(())
    }

    /// Detaches the game object from its parent, making it a root.
    pub fn make_root(&mut self, node: GameObject) -> Result<()> {
        self.set_parent(node, None)
    }

    /// Points the node's [Transformation] at its parent's, and its children's transformations at
    /// the node's.
    fn link_transformations(&mut self, node: GameObject) {
        let Some(data) = self.game_objects.get(&node) else {
            return;
        };

        let parent_transformation = data
            .parent
            .and_then(|parent| self.find_component::<Transformation>(parent));
        let own_transformation = self.find_component::<Transformation>(node);
        let children = data.children.clone();

        if let Some(transformation) = self.get_component_mut::<Transformation>(node) {
            transformation.set_parent(parent_transformation);
        }

        for child in children {
            if let Some(transformation) = self.get_component_mut::<Transformation>(child) {
                transformation.set_parent(own_transformation);
            }
        }
    }

    /// Initializes every component of the subtree that hasn't been initialized yet: the node's
    /// own components in attachment order, then each child's subtree in child order.
    pub fn initialize(&mut self, node: GameObject) -> Result<()> {
        self.data(node)?;

        for object in self.subtree_pre_order(node) {
            if let Some(data) = self.game_objects.get_mut(&object) {
                for slot in &mut data.components {
                    slot.initialize();
                }
            }
        }

        Ok(())
    }

    /// Fires the shutdown events of the node's own components.
    pub(crate) fn shutdown_events(&mut self, node: GameObject) {
        if let Some(data) = self.game_objects.get_mut(&node) {
            for slot in &mut data.components {
                slot.shutdown_events();
            }
        }
    }

    /// Attaches the component to the game object and runs its creation hooks.
    pub fn add_component<T: Component>(
        &mut self,
        node: GameObject,
        component: T,
    ) -> Result<ComponentId> {
        self.ensure_mutable(node)?;

        let slot = ComponentSlot::new(node, Box::new(component));
        let id = slot.id();
        self.component_owners.insert(id, node);

        let data = self.data_mut(node)?;
        data.components.push(slot);
        if let Some(slot) = data.components.last_mut() {
            slot.create();
        }

        self.link_transformations(node);

        Ok(id)
    }

    /// Shuts the component down and releases it.
    pub fn remove_component(&mut self, node: GameObject, component: ComponentId) -> Result<()> {
        self.ensure_mutable(node)?;
        match self.component_owners.get(&component) {
            None => return Err(SceneError::UnknownComponent(component)),
            Some(owner) if *owner != node => {
                return Err(SceneError::ComponentNotOwned { component, node })
            }
            Some(_) => {}
        }

        let data = self.data_mut(node)?;
        let index = data
            .components
            .iter()
            .position(|slot| slot.id() == component)
            .ok_or(SceneError::UnknownComponent(component))?;
        let slot = data.components.remove(index);
        slot.shutdown();
        self.component_owners.remove(&component);

        self.link_transformations(node);

        Ok(())
    }

    /// Removes the first component of type `T`. Returns false if there is none.
    pub fn remove_component_of<T: Component>(&mut self, node: GameObject) -> Result<bool> {
        self.data(node)?;
        match self.find_component::<T>(node) {
            Some(component) => self.remove_component(node, component).map(|_| true),
            None => Ok(false),
        }
    }

    /// Removes every component of type `T` and returns how many were removed.
    pub fn remove_all_components_of<T: Component>(&mut self, node: GameObject) -> Result<usize> {
        let components: Vec<ComponentId> = self
            .data(node)?
            .components
            .iter()
            .filter(|slot| slot.is::<T>())
            .map(|slot| slot.id())
            .collect();

        for component in &components {
            self.remove_component(node, *component)?;
        }

        Ok(components.len())
    }

    /// Returns the components of the game object in attachment order.
    pub fn components(&self, node: GameObject) -> Result<Vec<ComponentId>> {
        Ok(self
            .data(node)?
            .components
            .iter()
            .map(|slot| slot.id())
            .collect())
    }

    /// Returns the id of the first component of type `T`.
    pub fn find_component<T: Component>(&self, node: GameObject) -> Option<ComponentId> {
        self.game_objects
            .get(&node)?
            .components
            .iter()
            .find(|slot| slot.is::<T>())
            .map(|slot| slot.id())
    }

    /// Returns the first component of type `T`.
    pub fn get_component<T: Component>(&self, node: GameObject) -> Option<&T> {
        self.game_objects
            .get(&node)?
            .components
            .iter()
            .find_map(|slot| slot.downcast_ref::<T>())
    }

    /// Returns the first component of type `T` mutably.
    pub fn get_component_mut<T: Component>(&mut self, node: GameObject) -> Option<&mut T> {
        self.game_objects
            .get_mut(&node)?
            .components
            .iter_mut()
            .find_map(|slot| slot.downcast_mut::<T>())
    }

    /// Returns every component of type `T` in attachment order.
    pub fn get_components<T: Component>(&self, node: GameObject) -> Vec<&T> {
        self.game_objects
            .get(&node)
            .into_iter()
            .flat_map(|data| data.components.iter())
            .filter_map(|slot| slot.downcast_ref::<T>())
            .collect()
    }
}
