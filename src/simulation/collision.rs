//! Collision grouping and perfectly inelastic merging
//!
//! Groups produced in one tick are disjoint: a body is consumed by at most one
//! merge. Under [`CollisionPolicy::Pairwise`] this holds because a claimed body
//! cannot join a later pair. Under [`CollisionPolicy::Transitive`] every
//! contact pair is unioned in a [`DisjointSet`] and each connected component
//! becomes one group.

use serde::Deserialize;

use crate::error::SimError;
use crate::simulation::states::{Body, IdAllocator, NVec2, Rgb};

/// How contacts found in one pass are turned into merge groups
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Each body merges with at most one partner per tick, first contact wins
    #[default]
    #[serde(rename = "pairwise")]
    Pairwise,

    /// All bodies chained together by contacts this tick merge into one
    #[serde(rename = "transitive")]
    Transitive,
}

/// Union-find over generation-local body indices
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    pub fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            // path halving
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    /// Returns false if `a` and `b` were already connected
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        true
    }

    /// Components with at least two members, each sorted ascending,
    /// ordered by their smallest member
    pub fn groups(&mut self) -> Vec<Vec<usize>> {
        let n = self.parent.len();
        let mut slot_of_root: Vec<Option<usize>> = vec![None; n];
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for i in 0..n {
            let root = self.find(i);
            if self.size[root] < 2 {
                continue;
            }
            match slot_of_root[root] {
                Some(slot) => groups[slot].push(i),
                None => {
                    slot_of_root[root] = Some(groups.len());
                    groups.push(vec![i]);
                }
            }
        }
        groups
    }
}

/// Merge a collision group into one new body with a fresh id.
///
/// Mass and momentum are conserved; position is the center of mass and
/// color the mass-weighted mean of the members. Kinetic energy is not conserved.
/// An empty group is an error and consumes no id.
pub fn merge(group: &[&Body], ids: &mut IdAllocator) -> Result<Body, SimError> {
    if group.is_empty() {
        return Err(SimError::EmptyGroup);
    }
    Ok(merge_group(group, ids))
}

/// Merge a group the caller knows is non-empty (union-find groups have 2+ members)
pub(crate) fn merge_group(group: &[&Body], ids: &mut IdAllocator) -> Body {
    let mut m = 0.0;
    let mut mx = NVec2::zeros();
    let mut mv = NVec2::zeros();
    let mut mc = [0.0f64; 3];

    for b in group {
        let bm = b.mass();
        m += bm;
        mx += b.x * bm;
        mv += b.v * bm;
        mc[0] += b.color.r as f64 * bm;
        mc[1] += b.color.g as f64 * bm;
        mc[2] += b.color.b as f64 * bm;
    }

    let channel = |c: f64| (c / m).round().clamp(0.0, 255.0) as u8;
    let color = Rgb::new(channel(mc[0]), channel(mc[1]), channel(mc[2]));

    Body::from_parts(ids.next_id(), mx / m, m, mv / m, color)
}
