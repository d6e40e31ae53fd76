use rand::Rng;

use crate::config::{Bounds, FlockConfig};
use crate::vector::Vector3D;

/// A single boid entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    /// Position in the flock, used to skip self during neighbor scans.
    pub index: usize,
    pub position: Vector3D,
    /// Unit heading. Speed is shared by the whole flock.
    pub velocity: Vector3D,
    pub vision_half_angle: f32,
}

impl Boid {
    pub fn new(index: usize, position: Vector3D, velocity: Vector3D, config: &FlockConfig) -> Self {
        Self {
            index,
            position,
            velocity,
            vision_half_angle: config.vision_half_angle,
        }
    }

    /// Uniformly placed inside `bounds`, heading in a random direction.
    pub fn random<R: Rng + ?Sized>(
        index: usize,
        bounds: &Bounds,
        config: &FlockConfig,
        rng: &mut R,
    ) -> Self {
        let position = Vector3D::new(
            sample(rng, bounds.min.x, bounds.max.x),
            sample(rng, bounds.min.y, bounds.max.y),
            sample(rng, bounds.min.z, bounds.max.z),
        );
        let heading = Vector3D::new(
            sample(rng, -1.0, 1.0),
            sample(rng, -1.0, 1.0),
            sample(rng, -1.0, 1.0),
        )
        .normalize();
        let velocity = if heading.is_zero() {
            Vector3D::new(1.0, 0.0, 0.0)
        } else {
            heading
        };
        Self::new(index, position, velocity, config)
    }

    /// Turn towards `target` and move one step of `speed` along the new heading.
    ///
    /// A steering sum of exactly zero keeps the previous heading.
    pub fn advance(&mut self, target: Vector3D, speed: f32) {
        let heading = self.velocity + target;
        if !heading.is_zero() {
            self.velocity = heading.normalize();
        }
        self.position += self.velocity * speed;
    }
}

/// A static circular obstacle lying in the z = 0 plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub index: usize,
    pub position: Vector3D,
    pub radius: f32,
}

impl Obstacle {
    pub fn new(index: usize, x: f32, y: f32, radius: f32) -> Self {
        Self {
            index,
            position: Vector3D::new(x, y, 0.0),
            radius,
        }
    }

    pub fn random<R: Rng + ?Sized>(
        index: usize,
        bounds: &Bounds,
        config: &FlockConfig,
        rng: &mut R,
    ) -> Self {
        let inset = config.obstacle_inset;
        let x = sample(rng, bounds.min.x + inset, bounds.max.x - inset);
        let y = sample(rng, bounds.min.y + inset, bounds.max.y - inset);
        Self::new(index, x, y, config.obstacle_radius)
    }
}

// Unlike `gen_range`, never panics on an empty or inverted range.
fn sample<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.gen::<f32>() * (max - min)
}
