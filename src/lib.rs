#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(missing_docs)]

//! # Arbor
//!
//! ![MIT](https://img.shields.io/badge/license-MIT-blue.svg)
//!
//! ## What is Arbor?
//!
//! Arbor is the game object layer of an early-stage game engine: a tree of named game objects, each
//! owning its children and a list of [Component]s with a create / initialize / update / shutdown
//! lifecycle.
//!
//! - A [GameObjectManager] owns the whole scene. Create one per scene and pass it to whatever runs
//!   the frame loop.
//! - Game objects are either roots or children of exactly one parent. Re-parenting keeps the root
//!   set in sync and rejects cycles.
//! - Destruction is deferred: [GameObjectManager::destroy_game_object] only queues the game object,
//!   the next [GameObjectManager::update] destroys it. Shutdown events fire for a whole subtree
//!   before any of its components shut down.
//! - [GameObjectManager::shutdown] tears everything down at the end of the program.
//!
//! ```
//! use arbor::Component;
//! use arbor::ComponentContext;
//! use arbor::GameObjectManager;
//!
//! struct Spin;
//!
//! impl Component for Spin {
//!     fn initialize(&mut self, context: ComponentContext) {
//!         println!("spinning {:?}", context.owner);
//!     }
//! }
//!
//! let mut scene = GameObjectManager::new();
//! let ship = scene.create_game_object("ship");
//! let turret = scene.create_child(ship, "turret").unwrap();
//! scene.add_component(turret, Spin).unwrap();
//! scene.initialize(ship).unwrap();
//!
//! scene.destroy_game_object(turret).unwrap();
//! assert!(scene.contains(turret));
//! scene.update();
//! assert!(!scene.contains(turret));
//!
//! scene.shutdown();
//! ```

pub use crate::app::advance_frame;
pub use crate::app::finish;
pub use crate::app::AppError;
pub use crate::app::Application;
pub use crate::app::ApplicationState;
pub use crate::app::Event;
pub use crate::component::AsAny;
pub use crate::component::Component;
pub use crate::component::ComponentContext;
pub use crate::component::ComponentId;
pub use crate::component::ComponentState;
pub use crate::components::Transformation;
pub use crate::config::ConfigError;
pub use crate::config::SceneConfig;
pub use crate::error::Result;
pub use crate::error::SceneError;
pub use crate::game_object::GameObject;
pub use crate::manager::GameObjectManager;

mod app;
mod component;
mod components;
mod config;
mod error;
mod game_object;
mod manager;
pub mod systems;
#[cfg(test)]
mod test_utils;
