//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario`, containing:
//! - engine settings (`Engine`)
//! - physical parameters (`Parameters`) and the gravity law built from them
//! - system state (`System` with bodies at t = 0)
//! - the body-following `Camera`
//!
//! The viewer inserts the scenario into Bevy as a `Resource`; headless runs and
//! tests drive it directly through [`Scenario::step`].

use std::fmt;
use std::time::{Duration, Instant};

use bevy::prelude::Resource;
use log::info;

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::SimError;
use crate::simulation::camera::{Camera, CameraCommand, RenderedBody};
use crate::simulation::engine::Engine;
use crate::simulation::forces::Singularity;
use crate::simulation::generators::generate;
use crate::simulation::integrator::{step, TickReport};
use crate::simulation::params::Parameters;
use crate::simulation::states::{BodyId, NVec2, Rgb, System};

/// Read-only values for the telemetry overlay
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tick: u64,
    pub body_count: usize,
    pub tracked_id: BodyId,
    pub tracked_mass: f64,
    pub tracked_velocity: NVec2,
    pub last_tick: Duration,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tick {}  bodies {}", self.tick, self.body_count)?;
        writeln!(
            f,
            "tracking {}  m = {:.2}  v = ({:.3}, {:.3})",
            self.tracked_id, self.tracked_mass, self.tracked_velocity.x, self.tracked_velocity.y
        )?;
        write!(f, "step {:.2} ms", self.last_tick.as_secs_f64() * 1000.0)
    }
}

#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub camera: Camera,
    viewport_center: NVec2,
    last_tick: Duration,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        cfg.validate()?;

        // Engine (runtime) from EngineConfig + CameraConfig
        let engine = Engine {
            collision: cfg.engine.collision,
            tick_rate: cfg.engine.tick_rate,
            pan_step: cfg.camera.pan_step,
        };

        // Parameters (runtime) from ParametersConfig
        let parameters = Parameters {
            G: cfg.parameters.G,
            singularity: match cfg.parameters.min_distance {
                Some(d) => Singularity::Clamp(d),
                None => Singularity::Skip,
            },
        };

        // Bodies: explicit list first, then anything generated
        let mut bodies = cfg.bodies;
        if let Some(generator) = &cfg.generator {
            bodies.extend(generate(generator, parameters.G)?);
        }

        let scenario = Self::from_bodies(engine, parameters, &bodies, cfg.camera.track)?;
        info!(
            "scenario built: {} bodies, total mass {:.2}, {:?} collisions",
            scenario.system.len(),
            scenario.system.total_mass(),
            scenario.engine.collision
        );
        Ok(scenario)
    }

    /// Create bodies in list order and point the camera at `track` (index), or the first body
    pub fn from_bodies(
        engine: Engine,
        parameters: Parameters,
        bodies: &[BodyConfig],
        track: Option<usize>,
    ) -> Result<Self, SimError> {
        let mut system = System::new();
        let mut created = Vec::with_capacity(bodies.len());
        for bc in bodies {
            let color = bc.color.map_or(Rgb::WHITE, |[r, g, b]| Rgb::new(r, g, b));
            created.push(system.spawn(NVec2::from(bc.x), bc.m, NVec2::from(bc.v), color)?);
        }

        let tracked = match track {
            Some(i) => *created.get(i).ok_or_else(|| {
                SimError::InvalidConfig(format!("track index {i} but only {} bodies", created.len()))
            })?,
            None => *created.first().ok_or(SimError::EmptyScenario)?,
        };

        let mut camera = Camera::new(tracked);
        let viewport_center = NVec2::zeros();
        camera.update_offset(&system, viewport_center)?;

        Ok(Self {
            engine,
            parameters,
            system,
            camera,
            viewport_center,
            last_tick: Duration::ZERO,
        })
    }

    /// Run one tick and recompute the camera offset
    pub fn step(&mut self) -> Result<TickReport, SimError> {
        let started = Instant::now();
        let gravity = self.parameters.gravity();
        let report = step(&mut self.system, &mut self.camera, &gravity, self.engine.collision);
        self.camera.update_offset(&self.system, self.viewport_center)?;
        self.last_tick = started.elapsed();
        Ok(report)
    }

    /// Apply an input command and refresh the offset so the next frame reflects it
    pub fn command(&mut self, cmd: CameraCommand) -> Result<(), SimError> {
        self.camera.command(cmd, &self.system, self.engine.pan_step);
        self.camera.update_offset(&self.system, self.viewport_center)?;
        Ok(())
    }

    /// Track a specific live body
    pub fn track(&mut self, id: BodyId) -> Result<(), SimError> {
        if !self.system.contains(id) {
            return Err(SimError::UnknownBody(id));
        }
        self.camera.retarget(id);
        self.camera.update_offset(&self.system, self.viewport_center)?;
        Ok(())
    }

    pub fn set_viewport_center(&mut self, center: NVec2) -> Result<(), SimError> {
        self.viewport_center = center;
        self.camera.update_offset(&self.system, self.viewport_center)?;
        Ok(())
    }

    pub fn viewport_center(&self) -> NVec2 {
        self.viewport_center
    }

    /// Screen-space copies for the renderer; physics state is untouched
    pub fn render_frame(&self) -> Vec<RenderedBody> {
        self.camera.apply_offset(&self.system)
    }

    pub fn snapshot(&self) -> Snapshot {
        let tracked_id = self.camera.tracked();
        let tracked = self.system.get(tracked_id);
        Snapshot {
            tick: self.system.t,
            body_count: self.system.len(),
            tracked_id,
            tracked_mass: tracked.map_or(0.0, |b| b.mass()),
            tracked_velocity: tracked.map_or(NVec2::zeros(), |b| b.v),
            last_tick: self.last_tick,
        }
    }
}
