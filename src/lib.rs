pub mod benchmark;
pub mod configuration;
pub mod simulation;
pub mod visualization;

pub use simulation::camera::{Camera, PanInput};
pub use simulation::interaction::{InteractionController, InteractionState};
pub use simulation::params::{Param, ParameterStore};
pub use simulation::sandbox::{Sandbox, TickInput, UiAction};
pub use simulation::world::{BodyId, BoxSpec, PhysicsWorld, RenderShape, ShapeView};

pub use configuration::config::{
    CameraConfig, FloorConfig, InteractionConfig, ParametersConfig, SettingsConfig, WindowConfig,
};

pub use visualization::boxsim_vis::run_sandbox;

pub use benchmark::benchmark::bench_step;
