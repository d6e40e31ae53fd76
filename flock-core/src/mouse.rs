use alloc::rc::Rc;
use core::cell::Cell;

use crate::vector::Vector3D;

/// World-space point owned and moved by the input side, read by the flock
/// through the link every tick.
pub type SharedCoordinate = Rc<Cell<Vector3D>>;

/// What the renderer needs to draw the attraction point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseTargetState {
    pub coordinate: Vector3D,
    /// `None` while inactive, otherwise attraction strength in (0, 1].
    pub health: Option<f32>,
}

/// Transient attraction point with a linear decay after release.
///
/// Inactive until activated. Held targets stay at full health; once released
/// the health falls from 1 to 0 over the configured lifetime, measured from
/// the release timestamp, and the target then becomes inactive again.
#[derive(Debug, Clone)]
pub struct MouseTarget {
    coordinate: SharedCoordinate,
    health: Option<f32>,
    decay_started_at: Option<u64>,
}

impl Default for MouseTarget {
    fn default() -> Self {
        Self::new(Rc::new(Cell::new(Vector3D::zero())))
    }
}

impl MouseTarget {
    pub fn new(coordinate: SharedCoordinate) -> Self {
        Self {
            coordinate,
            health: None,
            decay_started_at: None,
        }
    }

    /// Bind a new externally owned coordinate and reset to inactive.
    pub fn link(&mut self, coordinate: SharedCoordinate) {
        self.coordinate = coordinate;
        self.health = None;
        self.decay_started_at = None;
    }

    pub fn activate(&mut self) {
        if self.decay_started_at.take().is_some() {
            log::debug!("mouse target re-activated during decay");
        } else if self.health.is_none() {
            log::debug!("mouse target activated");
        }
        self.health = Some(1.0);
    }

    /// Start (or restart) the decay at `now_ms`.
    ///
    /// Releasing an inactive target counts as a press and release within one
    /// frame, so the target appears at full health and starts decaying.
    pub fn release(&mut self, now_ms: u64) {
        if self.health.is_none() {
            self.health = Some(1.0);
        }
        log::debug!("mouse target released at {} ms", now_ms);
        self.decay_started_at = Some(now_ms);
    }

    /// Recompute health from the time elapsed since release.
    pub fn decay(&mut self, now_ms: u64, life_ms: u64) {
        let Some(started_at) = self.decay_started_at else {
            return;
        };

        let elapsed = now_ms.saturating_sub(started_at);
        if elapsed >= life_ms {
            log::debug!("mouse target expired after {} ms", elapsed);
            self.health = None;
            self.decay_started_at = None;
        } else {
            self.health = Some(1.0 - elapsed as f32 / life_ms as f32);
        }
    }

    pub fn is_decaying(&self) -> bool {
        self.decay_started_at.is_some()
    }

    pub fn health(&self) -> Option<f32> {
        self.health
    }

    pub fn coordinate(&self) -> Vector3D {
        self.coordinate.get()
    }

    /// Unit vector from `position` towards the current coordinate.
    pub fn attraction(&self, position: Vector3D) -> Vector3D {
        (self.coordinate.get() - position).normalize()
    }

    pub fn state(&self) -> MouseTargetState {
        MouseTargetState {
            coordinate: self.coordinate.get(),
            health: self.health,
        }
    }
}
