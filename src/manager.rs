use log::debug;
use log::info;
use log::trace;
use nohash::IntMap;
use nohash::IntSet;

use crate::game_object::GameObjectData;
use crate::Component;
use crate::ComponentId;
use crate::ComponentState;
use crate::GameObject;
use crate::Result;
use crate::SceneConfig;

/// # Game Object Manager
///
/// Owns every game object of a scene. Root game objects are kept in creation order, destruction is
/// deferred until the next [GameObjectManager::update] so handles stay valid for the rest of the
/// frame.
pub struct GameObjectManager {
    config: SceneConfig,
    pub(crate) game_objects: IntMap<GameObject, GameObjectData>,
    pub(crate) component_owners: IntMap<ComponentId, GameObject>,
    roots: Vec<GameObject>,
    dead: Vec<GameObject>,
    dead_lookup: IntSet<GameObject>,
}

impl GameObjectManager {
    /// Returns an empty scene with the default config.
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Returns an empty scene with the given config.
    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            roots: Vec::with_capacity(config.root_capacity),
            config,
            game_objects: IntMap::default(),
            component_owners: IntMap::default(),
            dead: Vec::new(),
            dead_lookup: IntSet::default(),
        }
    }

    /// Returns the config the scene was created with.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Returns true if the game object belongs to the scene and hasn't been destroyed yet.
    pub fn contains(&self, node: GameObject) -> bool {
        self.game_objects.contains_key(&node)
    }

    /// Returns the number of live game objects.
    pub fn len(&self) -> usize {
        self.game_objects.len()
    }

    /// Returns true if the scene has no game objects.
    pub fn is_empty(&self) -> bool {
        self.game_objects.is_empty()
    }

    /// Returns the root game objects in the order they became roots.
    pub fn root_game_objects(&self) -> &[GameObject] {
        &self.roots
    }

    /// Returns true if the game object is queued for destruction.
    pub fn is_pending_destruction(&self, node: GameObject) -> bool {
        self.dead_lookup.contains(&node)
    }

    /// Returns the game object the component is attached to.
    pub fn component_owner(&self, component: ComponentId) -> Option<GameObject> {
        self.component_owners.get(&component).copied()
    }

    /// Returns the lifecycle state of the component.
    pub fn component_state(&self, component: ComponentId) -> Option<ComponentState> {
        let owner = self.component_owner(component)?;
        self.game_objects
            .get(&owner)?
            .components
            .iter()
            .find(|slot| slot.id() == component)
            .map(|slot| slot.state())
    }

    /// Returns the component if it has type `T`.
    pub fn component<T: Component>(&self, component: ComponentId) -> Option<&T> {
        let owner = self.component_owner(component)?;
        self.game_objects
            .get(&owner)?
            .components
            .iter()
            .find(|slot| slot.id() == component)
            .and_then(|slot| slot.downcast_ref::<T>())
    }

    /// Returns the component mutably if it has type `T`.
    pub fn component_mut<T: Component>(&mut self, component: ComponentId) -> Option<&mut T> {
        let owner = self.component_owner(component)?;
        self.game_objects
            .get_mut(&owner)?
            .components
            .iter_mut()
            .find(|slot| slot.id() == component)
            .and_then(|slot| slot.downcast_mut::<T>())
    }

    pub(crate) fn insert_game_object(&mut self, name: String) -> GameObject {
        let node = GameObject::new();
        self.game_objects.insert(node, GameObjectData::new(name));
        node
    }

    /// Creates a new root game object.
    pub fn create_game_object(&mut self, name: impl Into<String>) -> GameObject {
        let node = self.insert_game_object(name.into());
        self.roots.push(node);
        debug!("created root {node:?}");
        node
    }

    /// Creates a new root game object named after [SceneConfig::default_name].
    pub fn create_default_game_object(&mut self) -> GameObject {
        let name = self.config.default_name.clone();
        self.create_game_object(name)
    }

    /// Registers the game object as a root. Already registered roots are left in place.
    pub(crate) fn add_root_game_object(&mut self, node: GameObject) {
        if self.roots.contains(&node) {
            trace!("{node:?} is already a root");
        } else {
            self.roots.push(node);
        }
    }

    /// Removes the game object from the root set, if present.
    pub(crate) fn remove_root_game_object(&mut self, node: GameObject) {
        if let Some(index) = self.roots.iter().position(|root| *root == node) {
            self.roots.remove(index);
        }
    }

    /// Queues the game object and its subtree for destruction on the next
    /// [GameObjectManager::update]. Queuing the same game object twice has no effect.
    pub fn destroy_game_object(&mut self, node: GameObject) -> Result<()> {
        self.data(node)?;

        if self.dead_lookup.insert(node) {
            self.dead.push(node);
            debug!("queued {node:?} for destruction");
        } else {
            trace!("{node:?} is already queued for destruction");
        }

        Ok(())
    }

    /// Shuts the game object down: it is destroyed, along with its subtree, on the next
    /// [GameObjectManager::update].
    pub fn shutdown_game_object(&mut self, node: GameObject) -> Result<()> {
        self.destroy_game_object(node)
    }

    /// Advances the scene by one frame: destroys the queued game objects, then updates the
    /// initialized components of every remaining game object in pre-order.
    pub fn update(&mut self) {
        let dead = std::mem::take(&mut self.dead);
        self.dead_lookup.clear();

        for node in dead {
            let Some(data) = self.game_objects.get(&node) else {
                debug!("{node:?} was already destroyed with an ancestor");
                continue;
            };

            let parent = data.parent;
            match parent {
                Some(parent) => self.detach_child(parent, node),
                None => self.remove_root_game_object(node),
            }

            self.fire_shutdown_events(node);
            self.release_subtree(node);
        }

        for node in self.all_pre_order() {
            if let Some(data) = self.game_objects.get_mut(&node) {
                for slot in &mut data.components {
                    slot.update();
                }
            }
        }
    }

    /// Destroys every game object immediately, bypassing the destruction queue. Shutdown events
    /// fire for the whole scene before any component is shut down.
    pub fn shutdown(&mut self) {
        info!("shutting down scene with {} game objects", self.len());

        let roots = std::mem::take(&mut self.roots);
        for root in &roots {
            self.fire_shutdown_events(*root);
        }

        for root in roots {
            self.release_subtree(root);
        }

        self.dead.clear();
        self.dead_lookup.clear();
    }

    fn fire_shutdown_events(&mut self, node: GameObject) {
        for object in self.subtree_pre_order(node) {
            self.shutdown_events(object);
        }
    }

    /// Destroys the subtree bottom-up: children before their parent, each game object's components
    /// in attachment order.
    fn release_subtree(&mut self, node: GameObject) {
        for object in self.subtree_post_order(node) {
            if let Some(data) = self.game_objects.remove(&object) {
                for slot in data.components {
                    self.component_owners.remove(&slot.id());
                    slot.shutdown();
                }

                debug!("destroyed {object:?}");
            }
        }
    }

    fn has_name(&self, node: GameObject, name: &str) -> bool {
        self.game_objects
            .get(&node)
            .is_some_and(|data| data.name == name)
    }

    /// Returns the first game object with the given name in pre-order.
    pub fn find_game_object_by_name(&self, name: &str) -> Option<GameObject> {
        let mut found = None;
        self.traverse_game_objects_pre_order(|node| {
            if self.has_name(node, name) {
                found = Some(node);
                return false;
            }

            true
        });

        found
    }

    /// Returns every game object with the given name in pre-order.
    pub fn find_all_game_objects_with_name(&self, name: &str) -> Vec<GameObject> {
        let mut found = Vec::new();
        self.traverse_game_objects_pre_order(|node| {
            if self.has_name(node, name) {
                found.push(node);
            }

            true
        });

        found
    }

    /// Calls `visit` for each root game object.
    pub fn for_each_root_game_object(&self, mut visit: impl FnMut(GameObject)) {
        for root in &self.roots {
            visit(*root);
        }
    }

    /// Visits every game object depth-first, parents before children, roots and children in their
    /// stored order. Returning false from `visit` stops the whole traversal.
    pub fn traverse_game_objects_pre_order(&self, visit: impl FnMut(GameObject) -> bool) {
        self.walk_pre_order(self.roots.iter().rev().copied().collect(), visit);
    }

    fn walk_pre_order(
        &self,
        mut stack: Vec<GameObject>,
        mut visit: impl FnMut(GameObject) -> bool,
    ) {
        while let Some(current) = stack.pop() {
            if !visit(current) {
                return;
            }

            if let Some(data) = self.game_objects.get(&current) {
                stack.extend(data.children.iter().rev().copied());
            }
        }
    }

    fn all_pre_order(&self) -> Vec<GameObject> {
        let mut nodes = Vec::with_capacity(self.len());
        self.traverse_game_objects_pre_order(|node| {
            nodes.push(node);
            true
        });

        nodes
    }

    pub(crate) fn subtree_pre_order(&self, node: GameObject) -> Vec<GameObject> {
        let mut nodes = Vec::new();
        self.walk_pre_order(vec![node], |object| {
            nodes.push(object);
            true
        });

        nodes
    }

    /// Children left to right, then the node itself.
    fn subtree_post_order(&self, node: GameObject) -> Vec<GameObject> {
        let mut nodes = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            nodes.push(current);
            if let Some(data) = self.game_objects.get(&current) {
                stack.extend(data.children.iter().copied());
            }
        }

        nodes.reverse();
        nodes
    }
}

impl Default for GameObjectManager {
    fn default() -> Self {
        Self::new()
    }
}
