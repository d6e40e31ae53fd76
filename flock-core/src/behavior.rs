//! Steering rules. Each returns a unit (or zero) target that the flock
//! weights and blends.

use crate::boid::{Boid, Obstacle};
use crate::config::{Bounds, FlockConfig};
use crate::vector::Vector3D;

/// The three classic flocking targets for one boid
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NeighbourTargets {
    pub cohesion: Vector3D,
    pub alignment: Vector3D,
    pub separation: Vector3D,
}

/// Result of testing one boid against every obstacle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ObstacleAvoidance {
    pub in_perimeter: bool,
    pub target: Vector3D,
}

/// Cohesion, alignment and separation from the neighbors `boid` can see.
///
/// Neighbors within `zone_outer` and inside the vision cone are split into a
/// "close" group (beyond `zone_inner`) and a "too close" group (at or within
/// `zone_inner`). The scan walks `boids` in order and stops as soon as the two
/// groups hold more than `max_neighbours_checked` boids together, so with a
/// crowded neighborhood the result depends on flock order.
pub fn neighbour_targets(boid: &Boid, boids: &[Boid], config: &FlockConfig) -> NeighbourTargets {
    let mut targets = NeighbourTargets::default();

    let mut close_count = 0usize;
    let mut close_position = Vector3D::zero();
    let mut close_velocity = Vector3D::zero();

    let mut too_close_count = 0usize;
    let mut too_close_position = Vector3D::zero();

    for other in boids {
        if other.index == boid.index {
            continue;
        }

        let offset = other.position - boid.position;
        let distance = offset.magnitude();
        if distance > config.zone_outer {
            continue;
        }

        let angle = boid.velocity.angle_between_unit(&offset.normalize());
        if angle <= boid.vision_half_angle {
            if distance > config.zone_inner {
                close_count += 1;
                close_position += other.position;
                close_velocity += other.velocity;
            } else {
                too_close_count += 1;
                too_close_position += other.position;
            }
        }

        if close_count + too_close_count > config.max_neighbours_checked {
            break;
        }
    }

    if close_count > 0 {
        let n = close_count as f32;
        targets.cohesion = (close_position / n - boid.position).normalize();
        targets.alignment = (close_velocity / n).normalize();
    }

    if too_close_count > 0 {
        let n = too_close_count as f32;
        targets.separation = (boid.position - too_close_position / n).normalize();
    }

    targets
}

/// Inward axis for the first bound `position` touches or crosses, checked in
/// the order x min, x max, y min, y max, z min, z max.
pub fn boundary_target(position: &Vector3D, bounds: &Bounds) -> Vector3D {
    if position.x <= bounds.min.x {
        Vector3D::new(1.0, 0.0, 0.0)
    } else if position.x >= bounds.max.x {
        Vector3D::new(-1.0, 0.0, 0.0)
    } else if position.y <= bounds.min.y {
        Vector3D::new(0.0, 1.0, 0.0)
    } else if position.y >= bounds.max.y {
        Vector3D::new(0.0, -1.0, 0.0)
    } else if position.z <= bounds.min.z {
        Vector3D::new(0.0, 0.0, 1.0)
    } else if position.z >= bounds.max.z {
        Vector3D::new(0.0, 0.0, -1.0)
    } else {
        Vector3D::zero()
    }
}

/// Tangential deflection around every obstacle whose circle contains `boid`.
///
/// Obstacles are circles in the xy plane. Of the two tangents at the boid's
/// bearing from the center, the one pointing along the current heading wins.
/// When circles overlap the last obstacle in order decides the target. While
/// inside any circle the boid's vision narrows to the restricted half-angle.
pub fn obstacle_target(
    boid: &mut Boid,
    obstacles: &[Obstacle],
    config: &FlockConfig,
) -> ObstacleAvoidance {
    let mut result = ObstacleAvoidance::default();

    for obstacle in obstacles {
        let radial = boid.position.flattened() - obstacle.position;
        if radial.magnitude() >= obstacle.radius {
            continue;
        }

        result.in_perimeter = true;
        let radial = radial.normalize();
        let clockwise = Vector3D::new(radial.y, -radial.x, 0.0);

        result.target = if clockwise.dot(&boid.velocity) > 0.0 {
            clockwise
        } else {
            -clockwise
        };

        boid.vision_half_angle = config.vision_half_angle_restricted;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn boid_at(index: usize, position: [f32; 3], velocity: [f32; 3]) -> Boid {
        Boid::new(
            index,
            position.into(),
            Vector3D::from(velocity).normalize(),
            &FlockConfig::default(),
        )
    }

    #[test]
    fn test_close_neighbour_feeds_cohesion_and_alignment() {
        let config = FlockConfig::default();
        let boids = [
            boid_at(0, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            boid_at(1, [1.5, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ];

        let targets = neighbour_targets(&boids[0], &boids, &config);

        assert_eq!(targets.cohesion, Vector3D::new(1.0, 0.0, 0.0));
        assert_eq!(targets.alignment, Vector3D::new(0.0, 1.0, 0.0));
        assert_eq!(targets.separation, Vector3D::zero());
    }

    #[test]
    fn test_neighbour_at_inner_radius_is_too_close() {
        let config = FlockConfig::default();
        let boids = [
            boid_at(0, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            boid_at(1, [1.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
        ];

        let targets = neighbour_targets(&boids[0], &boids, &config);

        assert_eq!(targets.separation, Vector3D::new(-1.0, 0.0, 0.0));
        assert_eq!(targets.cohesion, Vector3D::zero());
        assert_eq!(targets.alignment, Vector3D::zero());
    }

    #[test]
    fn test_neighbour_at_outer_radius_is_perceived() {
        let config = FlockConfig::default();
        let boids = [
            boid_at(0, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            boid_at(1, [2.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            boid_at(2, [0.0, 2.5, 0.0], [1.0, 0.0, 0.0]),
        ];

        let targets = neighbour_targets(&boids[0], &boids, &config);

        assert_eq!(targets.cohesion, Vector3D::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_neighbour_behind_is_outside_vision() {
        let config = FlockConfig::default();
        let boids = [
            boid_at(0, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            boid_at(1, [-1.5, 0.0, 0.0], [1.0, 0.0, 0.0]),
        ];

        let targets = neighbour_targets(&boids[0], &boids, &config);

        assert_eq!(targets, NeighbourTargets::default());
    }

    #[test]
    fn test_restricted_vision_hides_side_neighbours() {
        let config = FlockConfig::default();
        let mut boids = [
            boid_at(0, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            boid_at(1, [0.0, 1.5, 0.0], [1.0, 0.0, 0.0]),
        ];

        let wide = neighbour_targets(&boids[0], &boids, &config);
        assert_eq!(wide.cohesion, Vector3D::new(0.0, 1.0, 0.0));

        boids[0].vision_half_angle = config.vision_half_angle_restricted;
        let narrow = neighbour_targets(&boids[0], &boids, &config);
        assert_eq!(narrow, NeighbourTargets::default());
    }

    #[test]
    fn test_coincident_neighbour_is_too_close() {
        let config = FlockConfig::default();
        let boids = [
            boid_at(0, [0.5, 0.5, 0.0], [1.0, 0.0, 0.0]),
            boid_at(1, [0.5, 0.5, 0.0], [0.0, 1.0, 0.0]),
        ];

        let targets = neighbour_targets(&boids[0], &boids, &config);

        assert_eq!(targets.separation, Vector3D::zero());
        assert!(!targets.separation.x.is_nan());
    }

    #[test]
    fn test_alignment_cancelling_headings_is_zero() {
        let config = FlockConfig::default();
        let boids = [
            boid_at(0, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            boid_at(1, [1.5, 0.0, 0.0], [0.0, 1.0, 0.0]),
            boid_at(2, [1.5, 0.0, 0.0], [0.0, -1.0, 0.0]),
        ];

        let targets = neighbour_targets(&boids[0], &boids, &config);

        assert_eq!(targets.alignment, Vector3D::zero());
        assert_eq!(targets.cohesion, Vector3D::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_scan_stops_after_neighbour_cap() {
        let config = FlockConfig::default();
        let mut boids = Vec::new();
        boids.push(boid_at(0, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]));
        // 21 close boids ahead on +x, then one on +y that the cap never reaches.
        for i in 1..=21 {
            boids.push(boid_at(i, [1.5, 0.0, 0.0], [1.0, 0.0, 0.0]));
        }
        boids.push(boid_at(22, [0.0, 1.5, 0.0], [0.0, 1.0, 0.0]));

        let targets = neighbour_targets(&boids[0], &boids, &config);

        assert_eq!(targets.cohesion, Vector3D::new(1.0, 0.0, 0.0));
        assert_eq!(targets.alignment, Vector3D::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_boundary_precedence() {
        let bounds = Bounds::new(&FlockConfig::default(), 1.0);

        assert_eq!(
            boundary_target(&Vector3D::new(-10.0, 0.0, 0.0), &bounds),
            Vector3D::new(1.0, 0.0, 0.0)
        );
        // Beyond x max and y min at once: x wins.
        assert_eq!(
            boundary_target(&Vector3D::new(11.0, -9.0, 0.0), &bounds),
            Vector3D::new(-1.0, 0.0, 0.0)
        );
        assert_eq!(
            boundary_target(&Vector3D::new(0.0, -9.0, 2.0), &bounds),
            Vector3D::new(0.0, 1.0, 0.0)
        );
        assert_eq!(
            boundary_target(&Vector3D::new(0.0, 8.0, 0.0), &bounds),
            Vector3D::new(0.0, -1.0, 0.0)
        );
        assert_eq!(
            boundary_target(&Vector3D::new(0.0, 0.0, -1.5), &bounds),
            Vector3D::new(0.0, 0.0, 1.0)
        );
        assert_eq!(
            boundary_target(&Vector3D::new(0.0, 0.0, 1.0), &bounds),
            Vector3D::new(0.0, 0.0, -1.0)
        );
        assert_eq!(
            boundary_target(&Vector3D::new(9.9, 7.9, 0.9), &bounds),
            Vector3D::zero()
        );
    }

    #[test]
    fn test_obstacle_deflection_follows_heading() {
        let config = FlockConfig::default();
        let obstacles = [Obstacle::new(0, 0.0, 0.0, 1.5)];
        let mut boid = boid_at(0, [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]);

        let avoidance = obstacle_target(&mut boid, &obstacles, &config);

        assert!(avoidance.in_perimeter);
        assert_eq!(avoidance.target, Vector3D::new(1.0, 0.0, 0.0));
        assert_eq!(boid.vision_half_angle, config.vision_half_angle_restricted);

        let mut reversed = boid_at(0, [0.0, 1.0, 0.0], [-1.0, 0.0, 0.0]);
        let avoidance = obstacle_target(&mut reversed, &obstacles, &config);
        assert_eq!(avoidance.target, Vector3D::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_obstacle_ignores_height() {
        let config = FlockConfig::default();
        let obstacles = [Obstacle::new(0, 0.0, 0.0, 1.5)];
        let mut boid = boid_at(0, [1.0, 0.0, 0.9], [0.0, 1.0, 0.0]);

        let avoidance = obstacle_target(&mut boid, &obstacles, &config);

        assert!(avoidance.in_perimeter);
        assert_eq!(avoidance.target.z, 0.0);
    }

    #[test]
    fn test_outside_obstacles_keeps_vision() {
        let config = FlockConfig::default();
        let obstacles = [Obstacle::new(0, 0.0, 0.0, 1.5)];
        let mut boid = boid_at(0, [1.5, 0.0, 0.0], [1.0, 0.0, 0.0]);

        let avoidance = obstacle_target(&mut boid, &obstacles, &config);

        assert_eq!(avoidance, ObstacleAvoidance::default());
        assert_eq!(boid.vision_half_angle, config.vision_half_angle);
    }

    #[test]
    fn test_overlapping_obstacles_last_wins() {
        let config = FlockConfig::default();
        // The boid sits 0.5 from the first center and 1.0 from the second.
        let obstacles = [
            Obstacle::new(0, 0.0, 0.5, 1.5),
            Obstacle::new(1, 1.0, 1.0, 1.5),
        ];
        let mut boid = boid_at(0, [0.0, 1.0, 0.0], [0.0, 1.0, 0.0]);

        let avoidance = obstacle_target(&mut boid, &obstacles, &config);

        // Radial from the second obstacle is -x, tangents are (0, 1) and (0, -1).
        assert!(avoidance.in_perimeter);
        assert_eq!(avoidance.target, Vector3D::new(0.0, 1.0, 0.0));

        let nearest_only = obstacle_target(&mut boid, &obstacles[..1], &config);
        assert_eq!(nearest_only.target, Vector3D::new(-1.0, 0.0, 0.0));
    }
}
