//! High-level runtime engine settings
//!
//! Selects the collision grouping policy, the physics tick rate
//! and the camera pan step used when running a `Scenario`

use super::collision::CollisionPolicy;

#[derive(Debug, Clone)]
pub struct Engine {
    pub collision: CollisionPolicy, // pairwise or transitive grouping
    pub tick_rate: f64, // physics ticks per second in the viewer
    pub pan_step: f64, // camera nudge per pan command
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            collision: CollisionPolicy::Pairwise,
            tick_rate: 120.0,
            pan_step: 10.0,
        }
    }
}
