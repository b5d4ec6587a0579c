use thiserror::Error;

use crate::ComponentId;
use crate::GameObject;

/// Result of a scene operation.
pub type Result<T> = std::result::Result<T, SceneError>;

/// # Scene Error
///
/// Invariant violations reported by the game object tree. A failing operation leaves the scene
/// unmodified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum SceneError {
    /// The game object was never part of this scene or has already been destroyed.
    #[error("unknown game object {0:?}")]
    UnknownGameObject(GameObject),
    /// The component was never attached in this scene or has already been released.
    #[error("unknown component {0:?}")]
    UnknownComponent(ComponentId),
    /// A game object cannot be its own parent.
    #[error("game object {0:?} cannot be parented to itself")]
    SelfParenting(GameObject),
    /// The new parent is a descendant of the game object.
    #[error("parenting {node:?} to its descendant {parent:?} would create a cycle")]
    CyclicParenting {
        /// Game object being re-parented.
        node: GameObject,
        /// Requested parent.
        parent: GameObject,
    },
    /// The game object is not a direct child of the given parent.
    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild {
        /// Expected parent.
        parent: GameObject,
        /// Game object that was expected to be a child.
        child: GameObject,
    },
    /// The component is attached to a different game object.
    #[error("component {component:?} is not owned by {node:?}")]
    ComponentNotOwned {
        /// Component that was addressed.
        component: ComponentId,
        /// Game object the caller assumed to be the owner.
        node: GameObject,
    },
    /// Child index outside of the current child list.
    #[error("child index {index} out of range for {node:?} with {len} children")]
    ChildIndexOutOfRange {
        /// Parent game object.
        node: GameObject,
        /// Requested index.
        index: usize,
        /// Number of children.
        len: usize,
    },
    /// The game object is queued for destruction and can no longer be mutated.
    #[error("game object {0:?} is pending destruction")]
    PendingDestruction(GameObject),
}
