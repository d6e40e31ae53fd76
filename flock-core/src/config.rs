use crate::vector::Vector3D;

/// Tunable constants of the flocking model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockConfig {
    /// Neighbors closer than this count as "too close" and feed separation.
    pub zone_inner: f32,
    /// Neighbors farther than this are not perceived at all.
    pub zone_outer: f32,
    /// The neighbor scan stops once more than this many neighbors were counted.
    pub max_neighbours_checked: usize,
    pub vision_half_angle: f32,
    /// Half-angle used for the rest of a tick while deflecting off an obstacle.
    pub vision_half_angle_restricted: f32,
    pub half_width: f32,
    /// Divided by the aspect ratio to get the vertical bounds.
    pub half_height: f32,
    pub half_depth: f32,
    pub obstacle_radius: f32,
    /// Distance obstacles are kept away from the bounds when spawned.
    pub obstacle_inset: f32,
    /// Distance travelled per tick.
    pub speed: f32,
    pub mouse_target_life_ms: u64,
    /// Mouse priority while an obstacle deflection is active.
    pub avoidance_priority: f32,
    pub cohesion_weight: f32,
    pub alignment_weight: f32,
    pub separation_weight: f32,
    pub boundary_weight: f32,
    pub mouse_weight: f32,
    pub obstacle_weight: f32,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            zone_inner: 1.0,
            zone_outer: 2.0,
            max_neighbours_checked: 20,
            vision_half_angle: 160.0_f32.to_radians(),
            vision_half_angle_restricted: 15.0_f32.to_radians(),
            half_width: 10.0,
            half_height: 8.0,
            half_depth: 1.0,
            obstacle_radius: 1.5,
            obstacle_inset: 1.0,
            speed: 0.1,
            mouse_target_life_ms: 3000,
            avoidance_priority: 0.1,
            cohesion_weight: 0.1,
            alignment_weight: 0.1,
            separation_weight: 0.2,
            boundary_weight: 0.2,
            mouse_weight: 0.2,
            obstacle_weight: 0.2,
        }
    }
}

/// Axis-aligned volume the flock is steered to stay inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vector3D,
    pub max: Vector3D,
}

impl Bounds {
    pub fn new(config: &FlockConfig, aspect_ratio: f32) -> Self {
        let half_height = config.half_height / aspect_ratio;
        Self {
            min: Vector3D::new(-config.half_width, -half_height, -config.half_depth),
            max: Vector3D::new(config.half_width, half_height, config.half_depth),
        }
    }

    pub fn contains(&self, point: &Vector3D) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}
