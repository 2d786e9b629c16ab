pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use error::SimError;

pub use simulation::states::{Body, BodyId, IdAllocator, NVec2, Rgb, System};
pub use simulation::forces::{NewtonianGravity, Singularity};
pub use simulation::collision::{merge, CollisionPolicy, DisjointSet};
pub use simulation::camera::{Camera, CameraCommand, PanDirection, RenderedBody};
pub use simulation::integrator::{interaction_pass, step, Merge, PassOutcome, TickReport};
pub use simulation::scenario::{Scenario, Snapshot};
pub use simulation::params::Parameters;
pub use simulation::engine::Engine;

pub use configuration::config::{BodyConfig, CameraConfig, EngineConfig, GeneratorConfig, ParametersConfig, ScenarioConfig};

pub use visualization::viewer2d::run_2d;

pub use benchmark::benchmark::bench_step;
