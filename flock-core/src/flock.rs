use alloc::vec::Vec;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::behavior;
use crate::boid::{Boid, Obstacle};
use crate::clock::Clock;
use crate::config::{Bounds, FlockConfig};
use crate::mouse::{MouseTarget, MouseTargetState, SharedCoordinate};
use crate::vector::Vector3D;

/// Blended steering for one boid in one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    pub target: Vector3D,
    /// Scale applied to the mouse attraction.
    pub priority: f32,
    pub in_perimeter: bool,
}

/// The whole simulated world: boids, obstacles and the mouse target.
///
/// Boids are updated one after another in place, so later boids in the
/// sequence already see the new positions and headings of earlier ones
/// within the same tick.
pub struct Flock<C: Clock> {
    boids: Vec<Boid>,
    obstacles: Vec<Obstacle>,
    mouse_target: MouseTarget,
    config: FlockConfig,
    bounds: Bounds,
    clock: C,
    tick: u64,
}

/// Flock driven by the system clock
#[cfg(feature = "std")]
pub type FlockStd = Flock<crate::clock::SystemClock>;

#[cfg(feature = "std")]
impl FlockStd {
    pub fn new(aspect_ratio: f32, boid_count: usize, obstacle_count: usize) -> Self {
        Self::new_with_config(
            aspect_ratio,
            boid_count,
            obstacle_count,
            FlockConfig::default(),
        )
    }

    pub fn new_with_config(
        aspect_ratio: f32,
        boid_count: usize,
        obstacle_count: usize,
        config: FlockConfig,
    ) -> Self {
        let mut rng = rand::thread_rng();
        Self::with_rng(
            aspect_ratio,
            boid_count,
            obstacle_count,
            config,
            crate::clock::SystemClock,
            &mut rng,
        )
    }
}

impl<C: Clock> Flock<C> {
    /// Flock with an explicit population.
    pub fn from_parts(
        aspect_ratio: f32,
        boids: Vec<Boid>,
        obstacles: Vec<Obstacle>,
        config: FlockConfig,
        clock: C,
    ) -> Self {
        log::debug!(
            "flock created with {} boids and {} obstacles (aspect ratio {})",
            boids.len(),
            obstacles.len(),
            aspect_ratio
        );

        Self {
            boids,
            obstacles,
            mouse_target: MouseTarget::default(),
            config,
            bounds: Bounds::new(&config, aspect_ratio),
            clock,
            tick: 0,
        }
    }

    /// Randomly populated flock that is identical for identical seeds.
    pub fn with_seed(
        aspect_ratio: f32,
        boid_count: usize,
        obstacle_count: usize,
        seed: u64,
        config: FlockConfig,
        clock: C,
    ) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::with_rng(
            aspect_ratio,
            boid_count,
            obstacle_count,
            config,
            clock,
            &mut rng,
        )
    }

    pub fn with_rng<R: Rng + ?Sized>(
        aspect_ratio: f32,
        boid_count: usize,
        obstacle_count: usize,
        config: FlockConfig,
        clock: C,
        rng: &mut R,
    ) -> Self {
        let bounds = Bounds::new(&config, aspect_ratio);
        let boids = (0..boid_count)
            .map(|i| Boid::random(i, &bounds, &config, &mut *rng))
            .collect();
        let obstacles = (0..obstacle_count)
            .map(|i| Obstacle::random(i, &bounds, &config, &mut *rng))
            .collect();

        Self::from_parts(aspect_ratio, boids, obstacles, config, clock)
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Number of completed `update` calls.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn link_mouse_target(&mut self, coordinate: SharedCoordinate) {
        self.mouse_target.link(coordinate);
    }

    pub fn activate_mouse_target(&mut self) {
        self.mouse_target.activate();
    }

    /// Start the decay of the mouse target; an inactive one appears at full
    /// health first.
    pub fn stop_mouse_target(&mut self) {
        let now = self.clock.now_ms();
        self.mouse_target.release(now);
    }

    pub fn mouse_target(&self) -> MouseTargetState {
        self.mouse_target.state()
    }

    /// Advance the simulation by one tick.
    pub fn update(&mut self) {
        let mut deflected = 0usize;

        for i in 0..self.boids.len() {
            let mut boid = self.boids[i];
            boid.vision_half_angle = self.config.vision_half_angle;

            let steering = self.steer(&mut boid);
            if steering.in_perimeter {
                deflected += 1;
            }

            boid.advance(steering.target, self.config.speed);
            self.boids[i] = boid;
        }

        if self.mouse_target.is_decaying() {
            let now = self.clock.now_ms();
            let life_ms = self.config.mouse_target_life_ms;
            self.mouse_target.decay(now, life_ms);
        }

        self.tick += 1;
        log::trace!(
            "tick {}: {} of {} boids deflected by obstacles",
            self.tick,
            deflected,
            self.boids.len()
        );
    }

    /// Blend every steering rule for `boid` against the current world.
    ///
    /// May narrow the boid's vision when it is inside an obstacle.
    pub fn steer(&self, boid: &mut Boid) -> Steering {
        let config = &self.config;
        let mut target = Vector3D::zero();

        let obstacle = behavior::obstacle_target(boid, &self.obstacles, config);
        let priority = if obstacle.in_perimeter {
            target += obstacle.target * config.obstacle_weight;
            config.avoidance_priority
        } else {
            let neighbours = behavior::neighbour_targets(boid, &self.boids, config);
            target += neighbours.cohesion * config.cohesion_weight;
            target += neighbours.alignment * config.alignment_weight;
            target += neighbours.separation * config.separation_weight;
            target += behavior::boundary_target(&boid.position, &self.bounds)
                * config.boundary_weight;
            1.0
        };

        if let Some(health) = self.mouse_target.health() {
            target += self.mouse_target.attraction(boid.position)
                * (priority * config.mouse_weight * health);
        }

        Steering {
            target,
            priority,
            in_perimeter: obstacle.in_perimeter,
        }
    }
}
