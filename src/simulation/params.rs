//! Physical parameters for the simulation
//!
//! `Parameters` holds the gravitational constant and the
//! close-encounter policy used by [`NewtonianGravity`]

use super::forces::{NewtonianGravity, Singularity};

/// Default gravitational constant, tuned for unit ticks and pixel-scale distances
pub const DEFAULT_G: f64 = 0.001;

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub singularity: Singularity, // coincident / near-coincident pair handling
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G: DEFAULT_G,
            singularity: Singularity::Skip,
        }
    }
}

impl Parameters {
    pub fn gravity(&self) -> NewtonianGravity {
        NewtonianGravity {
            G: self.G,
            singularity: self.singularity,
        }
    }
}
