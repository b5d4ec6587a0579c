use std::any::Any;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use log::trace;

use crate::GameObject;

static ALLOCATOR: AtomicUsize = AtomicUsize::new(1);

/// # Component Id
///
/// Handle to a component attached to a game object.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ComponentId {
    id: usize,
}

impl ComponentId {
    fn new() -> Self {
        Self {
            id: ALLOCATOR.fetch_add(1, Ordering::Relaxed),
        }
    }
}

impl nohash::IsEnabled for ComponentId {}

/// # Component Context
///
/// Identity of the component a hook is running for.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ComponentContext {
    /// The component itself.
    pub id: ComponentId,
    /// Game object the component is attached to.
    pub owner: GameObject,
}

/// # Component State
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ComponentState {
    /// Attached and created, waiting for initialization.
    Created,
    /// Initialized by its owner.
    Initialized,
    /// Shutdown events have fired and the component is being released. Release happens in the same
    /// call, so the scene never reports this state; it keeps the shutdown hooks from running twice.
    ShuttingDown,
}

/// Downcasting support for [Component] trait objects.
pub trait AsAny: Any {
    /// Returns the value as [Any].
    fn as_any(&self) -> &dyn Any;

    /// Returns the value as mutable [Any].
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// # Component
///
/// Behavior attached to exactly one game object. Every hook is optional. The owner drives the
/// lifecycle:
///
/// 1. [Component::add_to_system] then [Component::on_create] when attached.
/// 2. [Component::initialize] once, when the owner is initialized.
/// 3. [Component::update] every frame.
/// 4. [Component::shutdown_events], [Component::on_shutdown] then
///    [Component::remove_from_system] before the component is released.
pub trait Component: AsAny {
    /// Registers the component with external systems before [Component::on_create] runs.
    fn add_to_system(&mut self, _context: ComponentContext) {}

    /// Runs once, right after the component is attached.
    fn on_create(&mut self, _context: ComponentContext) {}

    /// Runs once, after the owner's subtree has been built.
    fn initialize(&mut self, _context: ComponentContext) {}

    /// Runs once per frame.
    fn update(&mut self, _context: ComponentContext) {}

    /// Clears references to other components and game objects. Runs for a whole subtree before
    /// any [Component::on_shutdown] of that subtree.
    fn shutdown_events(&mut self, _context: ComponentContext) {}

    /// Runs once, before the component is released.
    fn on_shutdown(&mut self, _context: ComponentContext) {}

    /// Unregisters the component from external systems.
    fn remove_from_system(&mut self, _context: ComponentContext) {}
}

/// Component owned by a game object, along with its lifecycle bookkeeping.
pub(crate) struct ComponentSlot {
    context: ComponentContext,
    state: ComponentState,
    behavior: Box<dyn Component>,
}

impl ComponentSlot {
    pub(crate) fn new(owner: GameObject, behavior: Box<dyn Component>) -> Self {
        Self {
            context: ComponentContext {
                id: ComponentId::new(),
                owner,
            },
            state: ComponentState::Created,
            behavior,
        }
    }

    pub(crate) fn id(&self) -> ComponentId {
        self.context.id
    }

    pub(crate) fn state(&self) -> ComponentState {
        self.state
    }

    pub(crate) fn downcast_ref<T: Component>(&self) -> Option<&T> {
        let behavior: &dyn Component = self.behavior.as_ref();
        behavior.as_any().downcast_ref::<T>()
    }

    pub(crate) fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        let behavior: &mut dyn Component = self.behavior.as_mut();
        behavior.as_any_mut().downcast_mut::<T>()
    }

    pub(crate) fn is<T: Component>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    pub(crate) fn create(&mut self) {
        trace!("creating component {:?}", self.context);
        self.behavior.add_to_system(self.context);
        self.behavior.on_create(self.context);
    }

    pub(crate) fn initialize(&mut self) {
        if self.state == ComponentState::Created {
            self.behavior.initialize(self.context);
            self.state = ComponentState::Initialized;
        }
    }

    pub(crate) fn update(&mut self) {
        if self.state == ComponentState::Initialized {
            self.behavior.update(self.context);
        }
    }

    pub(crate) fn shutdown_events(&mut self) {
        if self.state != ComponentState::ShuttingDown {
            self.behavior.shutdown_events(self.context);
            self.state = ComponentState::ShuttingDown;
        }
    }

    /// Runs the remaining shutdown hooks and releases the component.
    pub(crate) fn shutdown(mut self) {
        trace!("releasing component {:?}", self.context);
        self.shutdown_events();
        self.behavior.on_shutdown(self.context);
        self.behavior.remove_from_system(self.context);
    }
}
