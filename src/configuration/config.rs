//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`EngineConfig`]     – collision grouping policy and physics tick rate
//! - [`ParametersConfig`] – gravitational constant and close-encounter handling
//! - [`CameraConfig`]     – pan step and initially tracked body
//! - [`BodyConfig`]       – explicit initial bodies
//! - [`GeneratorConfig`]  – optional generated bodies, appended after `bodies`
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   collision: "pairwise"   # or "transitive"
//!   tick_rate: 120.0        # physics ticks per second in the viewer
//!
//! parameters:
//!   G: 0.001                # gravitational constant
//!   min_distance: 0.5       # optional, floors the force separation
//!
//! camera:
//!   pan_step: 10.0
//!   track: 0                # index into the initial body list
//!
//! bodies:
//!   - x: [0.0, 0.0]
//!     m: 100000.0
//!     color: [255, 220, 120]
//!
//! generator:
//!   kind: solar_system
//!   n: 4000
//!   sun_mass: 100000.0
//!   orbit_range: [100.0, 500.0]
//!   mass_range: [1.0, 1.0]
//!   seed: 7
//! ```
//!
//! Every section is optional; missing values fall back to the defaults below.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::SimError;
use crate::simulation::collision::CollisionPolicy;
use crate::simulation::params::DEFAULT_G;

fn default_tick_rate() -> f64 {
    120.0
}

fn default_g() -> f64 {
    DEFAULT_G
}

fn default_pan_step() -> f64 {
    10.0
}

fn default_coord_range() -> [f64; 2] {
    [50.0, 750.0]
}

fn default_cloud_mass_range() -> [f64; 2] {
    [1.0, 8.0]
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default)]
    pub collision: CollisionPolicy, // how contacts are grouped into merges
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f64, // viewer physics rate in Hz
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            collision: CollisionPolicy::default(),
            tick_rate: default_tick_rate(),
        }
    }
}

/// Physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    #[serde(default = "default_g")]
    pub G: f64, // gravitational constant
    #[serde(default)]
    pub min_distance: Option<f64>, // `None` skips coincident pairs, `Some(d)` also floors the separation at d
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            G: default_g(),
            min_distance: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct CameraConfig {
    #[serde(default = "default_pan_step")]
    pub pan_step: f64,
    #[serde(default)]
    pub track: Option<usize>, // index into the initial body list, first body if absent
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            pan_step: default_pan_step(),
            track: None,
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial position
    #[serde(default)]
    pub v: [f64; 2], // initial velocity, at rest if omitted
    pub m: f64, // mass, radius is derived as cbrt(m)
    #[serde(default)]
    pub color: Option<[u8; 3]>, // white if omitted
}

/// Random initial conditions
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeneratorConfig {
    /// Bodies at rest, uniformly spread over a square
    UniformCloud {
        n: usize,
        #[serde(default = "default_coord_range")]
        coord_range: [f64; 2],
        #[serde(default = "default_cloud_mass_range")]
        mass_range: [f64; 2],
        #[serde(default)]
        seed: Option<u64>,
    },
    /// A sun at the origin with a ring of bodies on circular orbits
    SolarSystem {
        n: usize,
        sun_mass: f64,
        orbit_range: [f64; 2],
        mass_range: [f64; 2],
        #[serde(default)]
        seed: Option<u64>,
    },
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub generator: Option<GeneratorConfig>,
}

impl ScenarioConfig {
    pub fn from_path(path: &Path) -> Result<Self, SimError> {
        let reader = BufReader::new(File::open(path)?);
        let cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, SimError> {
        let cfg: ScenarioConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the engine cannot run with.
    /// Body masses are checked later, when bodies are created.
    pub fn validate(&self) -> Result<(), SimError> {
        let invalid = |msg: String| Err(SimError::InvalidConfig(msg));

        if !(self.engine.tick_rate.is_finite() && self.engine.tick_rate > 0.0) {
            return invalid(format!("engine.tick_rate must be positive, got {}", self.engine.tick_rate));
        }
        if !(self.parameters.G.is_finite() && self.parameters.G >= 0.0) {
            return invalid(format!("parameters.G must be non-negative, got {}", self.parameters.G));
        }
        if let Some(d) = self.parameters.min_distance {
            if !(d.is_finite() && d > 0.0) {
                return invalid(format!("parameters.min_distance must be positive, got {d}"));
            }
        }
        if !(self.camera.pan_step.is_finite() && self.camera.pan_step > 0.0) {
            return invalid(format!("camera.pan_step must be positive, got {}", self.camera.pan_step));
        }

        match &self.generator {
            Some(GeneratorConfig::UniformCloud { n, coord_range, mass_range, .. }) => {
                check_count(*n)?;
                check_range("coord_range", coord_range, false)?;
                check_range("mass_range", mass_range, true)?;
            }
            Some(GeneratorConfig::SolarSystem { n, sun_mass, orbit_range, mass_range, .. }) => {
                check_count(*n)?;
                if !(sun_mass.is_finite() && *sun_mass > 0.0) {
                    return invalid(format!("generator.sun_mass must be positive, got {sun_mass}"));
                }
                check_range("orbit_range", orbit_range, true)?;
                check_range("mass_range", mass_range, true)?;
            }
            None => {}
        }

        let total = self.body_count();
        if total == 0 {
            return Err(SimError::EmptyScenario);
        }
        if let Some(track) = self.camera.track {
            if track >= total {
                return invalid(format!("camera.track = {track} but the scenario has {total} bodies"));
            }
        }
        Ok(())
    }

    /// Number of bodies the scenario starts with
    pub fn body_count(&self) -> usize {
        let generated = match &self.generator {
            Some(GeneratorConfig::UniformCloud { n, .. }) => *n,
            Some(GeneratorConfig::SolarSystem { n, .. }) => n + 1, // plus the sun
            None => 0,
        };
        self.bodies.len() + generated
    }
}

fn check_count(n: usize) -> Result<(), SimError> {
    if n == 0 {
        return Err(SimError::InvalidConfig("generator.n must be at least 1".into()));
    }
    Ok(())
}

pub(crate) fn check_range(name: &str, range: &[f64; 2], positive: bool) -> Result<(), SimError> {
    let [lo, hi] = *range;
    if !(lo.is_finite() && hi.is_finite()) || lo > hi {
        return Err(SimError::InvalidConfig(format!("generator.{name} must be [min, max], got [{lo}, {hi}]")));
    }
    if positive && lo <= 0.0 {
        return Err(SimError::InvalidConfig(format!("generator.{name} must be positive, got [{lo}, {hi}]")));
    }
    Ok(())
}
