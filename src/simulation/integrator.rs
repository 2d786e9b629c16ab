//! Fixed unit-step tick for the N-body system
//!
//! A tick runs in strict phases so no phase observes a partial result of another:
//! 1. reset collision flags
//! 2. all-pairs gravity + contact detection ([`interaction_pass`])
//! 3. merge each collision group into a new body
//! 4. swap in the next generation (survivors + merge products)
//! 5. retarget the camera if its body was consumed
//! 6. explicit Euler drift `x += v`
//!
//! The camera offset is recomputed by the caller after `step` returns.

use std::collections::BTreeMap;

use log::{debug, trace};

use super::camera::Camera;
use super::collision::{merge_group, CollisionPolicy, DisjointSet};
use super::forces::NewtonianGravity;
use super::states::{Body, BodyId, System};

/// One merge performed during a tick
#[derive(Debug, Clone, PartialEq)]
pub struct Merge {
    pub consumed: Vec<BodyId>, // ascending
    pub product: BodyId,
    pub mass: f64,
}

#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub survivors: usize,
    pub merges: Vec<Merge>,
    pub skipped_pairs: usize, // degenerate pairs that exchanged no impulse
}

/// Result of the all-pairs pass over one generation
#[derive(Debug, Clone, Default)]
pub struct PassOutcome {
    pub groups: Vec<Vec<usize>>, // disjoint index sets, each of size >= 2
    pub skipped_pairs: usize,
}

/// Visit every unordered pair (i, j), i < j, exactly once.
///
/// For each pair the contact test runs first, then gravity is always applied,
/// colliding or not. Contacts mark both bodies `collided` and are grouped per
/// `policy`. Positions are not touched.
pub fn interaction_pass(bodies: &mut [Body], gravity: &NewtonianGravity, policy: CollisionPolicy) -> PassOutcome {
    let n = bodies.len();
    let mut components = DisjointSet::new(n);
    let mut skipped_pairs = 0;

    for i in 0..n {
        for j in (i + 1)..n {
            // disjoint &mut to bodies i and j
            let (head, tail) = bodies.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];

            let contact = match policy {
                CollisionPolicy::Pairwise => !a.collided && !b.collided && a.collides(b),
                CollisionPolicy::Transitive => a.collides(b),
            };
            if contact {
                a.collided = true;
                b.collided = true;
                // pairwise contacts never share a body, so their components are exactly the pairs
                components.union(i, j);
            }

            if !gravity.apply(a, b) {
                skipped_pairs += 1;
            }
        }
    }

    PassOutcome {
        groups: components.groups(),
        skipped_pairs,
    }
}

/// Advance `sys` by one tick and keep `camera` pointed at a live body
pub fn step(sys: &mut System, camera: &mut Camera, gravity: &NewtonianGravity, policy: CollisionPolicy) -> TickReport {
    // generation-local index table, ascending id order
    let mut generation: Vec<Body> = std::mem::take(&mut sys.bodies).into_values().collect();
    for b in generation.iter_mut() {
        b.collided = false;
    }

    let pass = interaction_pass(&mut generation, gravity, policy);

    let mut next: BTreeMap<BodyId, Body> = BTreeMap::new();
    let mut merges = Vec::with_capacity(pass.groups.len());

    for group in &pass.groups {
        let members: Vec<&Body> = group.iter().map(|&i| &generation[i]).collect();
        let product = merge_group(&members, &mut sys.ids);
        let consumed: Vec<BodyId> = members.iter().map(|b| b.id()).collect();

        debug!("merged {:?} -> {} (m = {:.3})", consumed, product.id(), product.mass());

        merges.push(Merge {
            consumed,
            product: product.id(),
            mass: product.mass(),
        });
        next.insert(product.id(), product);
    }

    let mut survivors = 0;
    for b in generation.into_iter().filter(|b| !b.collided) {
        survivors += 1;
        next.insert(b.id(), b);
    }

    sys.bodies = next;

    for m in &merges {
        if camera.follow_merge(&m.consumed, m.product) {
            debug!("camera retargeted to {}", m.product);
        }
    }

    for b in sys.bodies.values_mut() {
        b.integrate();
    }
    sys.t += 1;

    trace!("tick {}: {} bodies, {} merges", sys.t, sys.len(), merges.len());

    TickReport {
        survivors,
        merges,
        skipped_pairs: pass.skipped_pairs,
    }
}
