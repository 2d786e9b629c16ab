pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod collision;
pub mod camera;
pub mod integrator;
pub mod generators;
pub mod scenario;
