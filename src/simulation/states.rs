//! Core state types for the N-body simulation.
//!
//! - `Body`: a disc of mass `m` with radius `cbrt(m)`, identified by a `BodyId`
//! - `System`: the arena of live bodies keyed by id, plus the id counter and tick count
//!
//! Ids come from an `IdAllocator` owned by the `System`, so two independent
//! simulations never share an id space. Iterating a `System` yields bodies in
//! ascending id order, which is also their creation order.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound::{Excluded, Unbounded};

use nalgebra::Vector2;

use crate::error::SimError;

pub type NVec2 = Vector2<f64>;

/// Stable handle of a body. Never reused within one `System`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id source. The first id handed out is 1.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn next_id(&mut self) -> BodyId {
        self.last += 1;
        BodyId(self.last)
    }

    /// Most recently assigned id, if any
    pub fn last_assigned(&self) -> Option<BodyId> {
        (self.last > 0).then_some(BodyId(self.last))
    }
}

/// Display color carried through merges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from the low 24 bits of `rgb` (0xRRGGBB)
    pub const fn from_u24(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }

    pub fn to_f32(self) -> [f32; 3] {
        [self.r as f32 / 255.0, self.g as f32 / 255.0, self.b as f32 / 255.0]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    id: BodyId,
    m: f64, // mass
    radius: f64, // cbrt(m), fixed at creation
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub color: Rgb,
    pub(crate) collided: bool, // claimed by a collision group this tick
}

impl Body {
    /// Create a body with the next id from `ids`.
    /// No id is consumed when the mass is rejected.
    pub fn new(ids: &mut IdAllocator, x: NVec2, m: f64, v: NVec2) -> Result<Self, SimError> {
        if !(m.is_finite() && m > 0.0) {
            return Err(SimError::NonPositiveMass(m));
        }
        Ok(Self::from_parts(ids.next_id(), x, m, v, Rgb::WHITE))
    }

    /// Caller guarantees `m > 0`
    pub(crate) fn from_parts(id: BodyId, x: NVec2, m: f64, v: NVec2, color: Rgb) -> Self {
        Self {
            id,
            m,
            radius: m.cbrt(),
            x,
            v,
            color,
            collided: false,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn mass(&self) -> f64 {
        self.m
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn collided(&self) -> bool {
        self.collided
    }

    pub fn momentum(&self) -> NVec2 {
        self.v * self.m
    }

    /// Squared distance between centers
    pub fn distance_squared(&self, other: &Body) -> f64 {
        (self.x - other.x).norm_squared()
    }

    /// Discs touch or overlap
    pub fn collides(&self, other: &Body) -> bool {
        let reach = self.radius + other.radius;
        self.distance_squared(other) <= reach * reach
    }

    /// Explicit Euler drift over one unit tick
    pub fn integrate(&mut self) {
        self.x += self.v;
    }
}

/// Arena of live bodies keyed by id
#[derive(Debug, Default)]
pub struct System {
    pub(crate) bodies: BTreeMap<BodyId, Body>,
    pub(crate) ids: IdAllocator,
    pub t: u64, // ticks simulated so far
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a body with a fresh id and insert it
    pub fn spawn(&mut self, x: NVec2, m: f64, v: NVec2, color: Rgb) -> Result<BodyId, SimError> {
        let body = Body::new(&mut self.ids, x, m, v)?.with_color(color);
        let id = body.id();
        self.bodies.insert(id, body);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.bodies.contains_key(&id)
    }

    /// Live bodies in ascending id order
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.bodies.keys().copied()
    }

    pub fn first_id(&self) -> Option<BodyId> {
        self.bodies.keys().next().copied()
    }

    pub fn last_id(&self) -> Option<BodyId> {
        self.bodies.keys().next_back().copied()
    }

    /// Smallest live id strictly greater than `id`
    pub fn id_after(&self, id: BodyId) -> Option<BodyId> {
        self.bodies.range((Excluded(id), Unbounded)).next().map(|(k, _)| *k)
    }

    /// Largest live id strictly smaller than `id`
    pub fn id_before(&self, id: BodyId) -> Option<BodyId> {
        self.bodies.range(..id).next_back().map(|(k, _)| *k)
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.values().map(Body::mass).sum()
    }

    pub fn total_momentum(&self) -> NVec2 {
        self.bodies.values().fold(NVec2::zeros(), |p, b| p + b.momentum())
    }

    /// Most recently assigned id, live or not
    pub fn last_assigned_id(&self) -> Option<BodyId> {
        self.ids.last_assigned()
    }
}
