use arbor::systems::compute_world_transforms;
use arbor::Application;
use arbor::ApplicationState;
use arbor::Component;
use arbor::ComponentContext;
use arbor::Event;
use arbor::GameObject;
use arbor::GameObjectManager;
use arbor::SceneConfig;
use arbor::Transformation;
use glam::Vec3;
use log::error;
use log::info;

/// Logs its lifecycle and counts down one frame per update. The playground destroys the fuse's
/// game object once the count reaches zero.
struct Fuse {
    frames_left: u32,
}

impl Component for Fuse {
    fn on_create(&mut self, context: ComponentContext) {
        info!("fuse attached to {:?}", context.owner);
    }

    fn initialize(&mut self, _context: ComponentContext) {
        info!("fuse lit, {} frames left", self.frames_left);
    }

    fn update(&mut self, _context: ComponentContext) {
        self.frames_left = self.frames_left.saturating_sub(1);
    }

    fn on_shutdown(&mut self, context: ComponentContext) {
        info!("fuse on {:?} shut down", context.owner);
    }
}

struct Playground {
    state: ApplicationState,
    scene: GameObjectManager,
    satellite: Option<GameObject>,
}

impl Playground {
    fn new(config: SceneConfig) -> Result<Self, arbor::SceneError> {
        let mut scene = GameObjectManager::with_config(config);

        let planet = scene.create_game_object("planet");
        let origin = Transformation::from_position(Vec3::new(0.0, 0.0, -10.0));
        scene.add_component(planet, origin)?;
        let satellite = scene.create_child(planet, "satellite")?;
        scene.add_component(satellite, Transformation::from_position(Vec3::X * 3.0))?;
        scene.add_component(satellite, Fuse { frames_left: 120 })?;
        let _ = scene.create_default_game_object();

        scene.initialize(planet)?;

        Ok(Self {
            state: ApplicationState::Running,
            scene,
            satellite: Some(satellite),
        })
    }
}

impl Application for Playground {
    fn title(&self) -> &str {
        "Arbor Playground"
    }

    fn state(&self) -> ApplicationState {
        self.state
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::CloseRequested => {
                self.state = ApplicationState::Finished;
            }
        }
    }

    fn update(&mut self) {
        compute_world_transforms(&mut self.scene);

        if let Some(satellite) = self.satellite {
            let burnt_out = self
                .scene
                .get_component::<Fuse>(satellite)
                .is_some_and(|fuse| fuse.frames_left == 0);

            if burnt_out {
                if let Err(err) = self.scene.destroy_game_object(satellite) {
                    error!("failed to destroy satellite: {err}");
                }
                self.satellite = None;
            }
        }
    }

    fn scene(&self) -> &GameObjectManager {
        &self.scene
    }

    fn scene_mut(&mut self) -> &mut GameObjectManager {
        &mut self.scene
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match SceneConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                error!("{err}");
                return;
            }
        },
        None => SceneConfig::default(),
    };

    let playground = match Playground::new(config) {
        Ok(playground) => playground,
        Err(err) => {
            error!("failed to build scene: {err}");
            return;
        }
    };

    if let Err(err) = playground.run() {
        error!("{err}");
    }
}
