//! Random initial conditions
//!
//! Generators only produce [`BodyConfig`] values; ids are assigned when the
//! scenario turns them into bodies.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::{check_range, BodyConfig, GeneratorConfig};
use crate::error::SimError;
use crate::simulation::states::{NVec2, Rgb};

fn rng_from(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(rand::random))
}

/// `n` bodies at rest, both coordinates uniform in `coord_range`.
/// Ranges must be finite `[min, max]`, masses positive.
pub fn uniform_cloud(
    n: usize,
    coord_range: [f64; 2],
    mass_range: [f64; 2],
    rng: &mut impl Rng,
) -> Result<Vec<BodyConfig>, SimError> {
    check_range("coord_range", &coord_range, false)?;
    check_range("mass_range", &mass_range, true)?;

    Ok((0..n)
        .map(|_| BodyConfig {
            x: [
                rng.random_range(coord_range[0]..=coord_range[1]),
                rng.random_range(coord_range[0]..=coord_range[1]),
            ],
            v: [0.0, 0.0],
            m: rng.random_range(mass_range[0]..=mass_range[1]),
            color: None,
        })
        .collect())
}

/// A sun of `sun_mass` at the origin followed by `n` bodies on circular orbits.
///
/// Each orbiting body sits at `(r cos φ, -r sin φ)` and moves along the
/// tangent with speed `sqrt(G M / r)`.
#[allow(non_snake_case)]
pub fn solar_system(
    n: usize,
    sun_mass: f64,
    orbit_range: [f64; 2],
    mass_range: [f64; 2],
    G: f64,
    rng: &mut impl Rng,
) -> Result<Vec<BodyConfig>, SimError> {
    if !(sun_mass.is_finite() && sun_mass > 0.0) {
        return Err(SimError::InvalidConfig(format!("generator.sun_mass must be positive, got {sun_mass}")));
    }
    if !(G.is_finite() && G >= 0.0) {
        return Err(SimError::InvalidConfig(format!("G must be non-negative, got {G}")));
    }
    check_range("orbit_range", &orbit_range, true)?;
    check_range("mass_range", &mass_range, true)?;

    let mut bodies = Vec::with_capacity(n + 1);
    bodies.push(BodyConfig {
        x: [0.0, 0.0],
        v: [0.0, 0.0],
        m: sun_mass,
        color: None,
    });

    for _ in 0..n {
        let r = rng.random_range(orbit_range[0]..=orbit_range[1]);
        let phi = rng.random_range(0.0..TAU);
        let x = phi.cos() * r;
        let y = -phi.sin() * r;

        let speed = (G * sun_mass / r).sqrt();
        let v = NVec2::new(-y, x).normalize() * speed;

        let c = Rgb::from_u24(rng.random_range(0..=0x00ff_ffff));
        bodies.push(BodyConfig {
            x: [x, y],
            v: [v.x, v.y],
            m: rng.random_range(mass_range[0]..=mass_range[1]),
            color: Some([c.r, c.g, c.b]),
        });
    }

    Ok(bodies)
}

/// Expand a generator section into bodies
#[allow(non_snake_case)]
pub fn generate(cfg: &GeneratorConfig, G: f64) -> Result<Vec<BodyConfig>, SimError> {
    match cfg {
        GeneratorConfig::UniformCloud {
            n,
            coord_range,
            mass_range,
            seed,
        } => uniform_cloud(*n, *coord_range, *mass_range, &mut rng_from(*seed)),
        GeneratorConfig::SolarSystem {
            n,
            sun_mass,
            orbit_range,
            mass_range,
            seed,
        } => solar_system(*n, *sun_mass, *orbit_range, *mass_range, G, &mut rng_from(*seed)),
    }
}
