use log::info;
use thiserror::Error;
use winit::error::EventLoopError;
use winit::error::OsError;
use winit::event::WindowEvent;
use winit::event_loop::ControlFlow;
use winit::event_loop::EventLoop;
use winit::window::WindowBuilder;

use crate::GameObjectManager;

/// # Application
///
/// Entry-point for building an application around a scene.
pub trait Application: Sized {
    /// Returns the title to be displayed in the application window.
    fn title(&self) -> &str;

    /// Returns the current state of the application. The application will exit if this returns
    /// [ApplicationState::Finished] after [Application::handle_event] or [Application::update] is
    /// called.
    fn state(&self) -> ApplicationState;

    /// Handles the incoming event.
    fn handle_event(&mut self, event: Event);

    /// Updates the application for the current frame. Runs after the scene update.
    fn update(&mut self);

    /// Returns a reference to the application's scene.
    fn scene(&self) -> &GameObjectManager;

    /// Returns a mutable reference to the application's scene.
    fn scene_mut(&mut self) -> &mut GameObjectManager;

    /// Runs the application until it finishes, then shuts the scene down.
    fn run(self) -> Result<(), AppError> {
        run_application(self)
    }
}

/// # Application State
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ApplicationState {
    /// Application is running.
    Running,
    /// Application has finished running.
    Finished,
}

/// # Event
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Event {
    /// Application window requested to close.
    CloseRequested,
}

/// # App Error
#[derive(Debug, Error)]
pub enum AppError {
    /// The platform event loop failed.
    #[error("event loop error: {0}")]
    EventLoop(#[from] EventLoopError),
    /// The application window could not be created.
    #[error("failed to create window: {0}")]
    Window(#[from] OsError),
}

/// Runs one frame: the scene update, which reaps destroyed game objects and updates components,
/// followed by the application update.
pub fn advance_frame(app: &mut impl Application) {
    app.scene_mut().update();
    app.update();
}

/// Tears the scene down. Call once, after the last frame.
pub fn finish(app: &mut impl Application) {
    app.scene_mut().shutdown();
}

fn run_application(mut app: impl Application) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut window_title = app.title().to_string();
    let window = WindowBuilder::new()
        .with_title(&window_title)
        .build(&event_loop)?;

    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run(|event, event_loop_window_target| {
        match event {
            winit::event::Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    app.handle_event(Event::CloseRequested);
                }
                _ => {}
            },
            winit::event::Event::AboutToWait => {
                advance_frame(&mut app);

                let title = app.title();
                if title != window_title {
                    window_title = title.to_string();
                    window.set_title(&window_title);
                }
            }
            _ => {}
        }

        if app.state() == ApplicationState::Finished {
            event_loop_window_target.exit();
        }
    })?;

    info!("event loop exited");
    finish(&mut app);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::Journal;
    use crate::test_utils::Recorder;

    struct Headless {
        scene: GameObjectManager,
        journal: Journal,
    }

    impl Application for Headless {
        fn title(&self) -> &str {
            "headless"
        }

        fn state(&self) -> ApplicationState {
            ApplicationState::Running
        }

        fn handle_event(&mut self, _event: Event) {}

        fn update(&mut self) {
            self.journal.push("app:update".to_string());
        }

        fn scene(&self) -> &GameObjectManager {
            &self.scene
        }

        fn scene_mut(&mut self) -> &mut GameObjectManager {
            &mut self.scene
        }
    }

    fn headless() -> Headless {
        let journal = Journal::default();
        let mut scene = GameObjectManager::new();
        let node = scene.create_game_object("node");
        scene
            .add_component(node, Recorder::new("c", &journal))
            .unwrap();
        scene.initialize(node).unwrap();
        journal.clear();

        Headless { scene, journal }
    }

    #[test]
    fn advance_frame_entries_returns_scene_update_before_app_update() {
        let mut app = headless();

        advance_frame(&mut app);

        assert_eq!(app.journal.entries(), ["c:update", "app:update"]);
    }

    #[test]
    fn advance_frame_reaps_queued_game_objects() {
        let mut app = headless();
        let node = app.scene().root_game_objects()[0];
        app.scene_mut().destroy_game_object(node).unwrap();

        advance_frame(&mut app);

        assert!(app.scene().is_empty());
        assert_eq!(app.journal.hooks("update"), ["app:update"]);
    }

    #[test]
    fn finish_shuts_scene_down() {
        let mut app = headless();

        finish(&mut app);

        assert!(app.scene().is_empty());
        assert_eq!(
            app.journal.entries(),
            ["c:shutdown_events", "c:on_shutdown", "c:remove_from_system"]
        );
    }
}
