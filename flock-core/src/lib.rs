//! Tick-driven 3D boid flocking.
//!
//! A [`Flock`] owns the boids, the static obstacles and a transient mouse
//! target. Each call to [`Flock::update`] moves every boid one step:
//! obstacle deflection first, otherwise cohesion, alignment, separation and
//! boundary avoidance, plus attraction towards the mouse target while it is
//! active.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod behavior;
pub mod boid;
pub mod clock;
pub mod config;
pub mod flock;
pub mod mouse;
pub mod vector;

pub use behavior::{NeighbourTargets, ObstacleAvoidance};
pub use boid::{Boid, Obstacle};
#[cfg(feature = "std")]
pub use clock::SystemClock;
pub use clock::{Clock, ManualClock};
pub use config::{Bounds, FlockConfig};
#[cfg(feature = "std")]
pub use flock::FlockStd;
pub use flock::{Flock, Steering};
pub use mouse::{MouseTarget, MouseTargetState, SharedCoordinate};
pub use vector::Vector3D;
