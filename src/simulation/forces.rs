//! Pairwise Newtonian gravity for the n-body engine
//!
//! The engine works with impulses over a unit tick: one call to
//! [`NewtonianGravity::apply`] is the complete, symmetric interaction of a pair
//! and updates both velocities. It must run once per unordered pair per tick.

use crate::simulation::states::Body;

/// What to do when two centers get arbitrarily close
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Singularity {
    #[default]
    /// Coincident centers (d² == 0) exchange no impulse for the tick
    Skip,
    /// Floor the separation used for the force magnitude at this distance.
    /// Coincident centers still exchange nothing, they have no direction.
    Clamp(f64),
}

/// Newtonian gravity F = G m_a m_b / d²
#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub singularity: Singularity,
}

impl NewtonianGravity {
    /// Apply equal and opposite impulses to `a` and `b`.
    /// Returns false when the pair was skipped as degenerate: coincident
    /// centers, or a separation so small the impulse is not finite.
    pub fn apply(&self, a: &mut Body, b: &mut Body) -> bool {
        // r points from b to a; a is pulled along -r, b along +r
        let r = a.x - b.x;
        let d2 = r.norm_squared();
        if d2 == 0.0 || d2.is_nan() {
            return false;
        }

        let d2_eff = match self.singularity {
            Singularity::Skip => d2,
            Singularity::Clamp(min) => d2.max(min * min),
        };

        let force = self.G * a.mass() * b.mass() / d2_eff;
        let dir = r / d2.sqrt();
        let dv_a = dir * (force / a.mass());
        let dv_b = dir * (force / b.mass());

        // subnormal d² overflows the force; leave both velocities alone
        if !(dv_a.iter().all(|c| c.is_finite()) && dv_b.iter().all(|c| c.is_finite())) {
            return false;
        }

        a.v -= dv_a;
        b.v += dv_b;
        true
    }
}
