//! Body-following camera
//!
//! The camera tracks a body by id, never by list position. When the tracked
//! body is consumed by a merge, [`crate::simulation::integrator::step`]
//! retargets it to the merge product inside the same tick.
//!
//! The offset is a render-space transform only: [`Camera::apply_offset`]
//! produces shifted copies and leaves the physics state in absolute
//! simulation coordinates.

use crate::error::SimError;
use crate::simulation::states::{Body, BodyId, NVec2, Rgb, System};

/// Pan directions in render space (y up)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

impl PanDirection {
    pub fn unit(self) -> NVec2 {
        match self {
            PanDirection::Up => NVec2::new(0.0, 1.0),
            PanDirection::Down => NVec2::new(0.0, -1.0),
            PanDirection::Left => NVec2::new(-1.0, 0.0),
            PanDirection::Right => NVec2::new(1.0, 0.0),
        }
    }
}

/// Discrete input commands. None of them touch physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraCommand {
    Pan(PanDirection),
    ResetPan,
    Next,
    Previous,
}

/// A body as the renderer should draw it this frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBody {
    pub id: BodyId,
    pub screen: NVec2,
    pub radius: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone)]
pub struct Camera {
    tracked: BodyId,
    pub pan: NVec2, // user pan, subtracted from the offset
    offset: NVec2, // last computed render offset
}

impl Camera {
    pub fn new(tracked: BodyId) -> Self {
        Self {
            tracked,
            pan: NVec2::zeros(),
            offset: NVec2::zeros(),
        }
    }

    pub fn tracked(&self) -> BodyId {
        self.tracked
    }

    pub fn offset(&self) -> NVec2 {
        self.offset
    }

    pub fn retarget(&mut self, id: BodyId) {
        self.tracked = id;
    }

    /// Retarget to `product` if the tracked body is among `consumed`
    pub(crate) fn follow_merge(&mut self, consumed: &[BodyId], product: BodyId) -> bool {
        if consumed.contains(&self.tracked) {
            self.tracked = product;
            return true;
        }
        false
    }

    pub fn compute_offset(&self, tracked: &Body, viewport_center: NVec2) -> NVec2 {
        viewport_center - tracked.x - self.pan
    }

    /// Recompute and store the offset for the tracked body
    pub fn update_offset(&mut self, sys: &System, viewport_center: NVec2) -> Result<NVec2, SimError> {
        let body = sys.get(self.tracked).ok_or(SimError::UnknownBody(self.tracked))?;
        self.offset = self.compute_offset(body, viewport_center);
        Ok(self.offset)
    }

    /// Screen-space copies of every body, shifted by the stored offset
    pub fn apply_offset(&self, sys: &System) -> Vec<RenderedBody> {
        sys.bodies()
            .map(|b| RenderedBody {
                id: b.id(),
                screen: b.x + self.offset,
                radius: b.radius(),
                color: b.color,
            })
            .collect()
    }

    /// Next live id above the tracked one, wrapping to the lowest
    pub fn find_next(&self, sys: &System) -> Option<BodyId> {
        sys.id_after(self.tracked).or_else(|| sys.first_id())
    }

    /// Next live id below the tracked one, wrapping to the highest
    pub fn find_previous(&self, sys: &System) -> Option<BodyId> {
        sys.id_before(self.tracked).or_else(|| sys.last_id())
    }

    pub fn pan(&mut self, dir: PanDirection, step: f64) {
        self.pan += dir.unit() * step;
    }

    pub fn reset_pan(&mut self) {
        self.pan = NVec2::zeros();
    }

    /// Apply an input command. Retargeting commands are no-ops on an empty system.
    pub fn command(&mut self, cmd: CameraCommand, sys: &System, pan_step: f64) {
        match cmd {
            CameraCommand::Pan(dir) => self.pan(dir, pan_step),
            CameraCommand::ResetPan => self.reset_pan(),
            CameraCommand::Next => {
                if let Some(id) = self.find_next(sys) {
                    self.retarget(id);
                }
            }
            CameraCommand::Previous => {
                if let Some(id) = self.find_previous(sys) {
                    self.retarget(id);
                }
            }
        }
    }
}
