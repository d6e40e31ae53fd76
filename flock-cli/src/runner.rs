use std::cell::Cell;
use std::io::Write;
use std::rc::Rc;

use anyhow::{Context, Result};
use flock_core::{Clock, Flock, SharedCoordinate};
use flock_shared::{AgentSnapshot, FrameSnapshot, MouseTargetStatus, ObstacleSnapshot};

use crate::script::{MouseAction, MouseScript};

/// Build the renderer-facing view of the current flock state.
pub fn frame_snapshot<C: Clock>(flock: &Flock<C>) -> FrameSnapshot {
    let mouse_target = flock.mouse_target();

    FrameSnapshot {
        tick: flock.tick(),
        agents: flock
            .boids()
            .iter()
            .map(|boid| AgentSnapshot {
                index: boid.index,
                position: boid.position.to_array(),
                velocity: boid.velocity.to_array(),
            })
            .collect(),
        obstacles: flock
            .obstacles()
            .iter()
            .map(|obstacle| ObstacleSnapshot {
                index: obstacle.index,
                position: obstacle.position.to_array(),
                radius: obstacle.radius,
            })
            .collect(),
        mouse_target: MouseTargetStatus {
            coordinate: mouse_target.coordinate.to_array(),
            health: mouse_target.health,
        },
    }
}

/// Write one frame as a single JSON line.
pub fn write_frame<W: Write>(writer: &mut W, frame: &FrameSnapshot) -> Result<()> {
    serde_json::to_writer(&mut *writer, frame).context("Failed to serialize frame")?;
    writer.write_all(b"\n").context("Failed to write frame")?;
    Ok(())
}

/// Drives a flock the way an interactive front end would: it owns the mouse
/// coordinate, moves it, raises the press/release events, then ticks.
pub struct Runner<C: Clock> {
    flock: Flock<C>,
    coordinate: SharedCoordinate,
    script: MouseScript,
    every: u64,
}

impl<C: Clock> Runner<C> {
    pub fn new(mut flock: Flock<C>, script: MouseScript, every: u64) -> Self {
        let coordinate = Rc::new(Cell::new(script.target));
        flock.link_mouse_target(Rc::clone(&coordinate));

        Self {
            flock,
            coordinate,
            script,
            every: every.max(1),
        }
    }

    pub fn flock(&self) -> &Flock<C> {
        &self.flock
    }

    /// Run one tick; returns a frame when the tick lands on the output interval.
    pub fn step(&mut self) -> Option<FrameSnapshot> {
        let tick = self.flock.tick();

        match self.script.action_at(tick) {
            Some(MouseAction::Activate) => {
                log::debug!("tick {}: pressing mouse target", tick);
                self.flock.activate_mouse_target();
            }
            Some(MouseAction::Release) => {
                log::debug!("tick {}: releasing mouse target", tick);
                self.flock.stop_mouse_target();
            }
            None => {}
        }

        if tick > 0 && !self.script.drift.is_zero() {
            let moved = self.coordinate.get() + self.script.drift;
            self.coordinate.set(moved);
        }

        self.flock.update();

        if self.flock.tick() % self.every == 0 {
            Some(frame_snapshot(&self.flock))
        } else {
            None
        }
    }
}
