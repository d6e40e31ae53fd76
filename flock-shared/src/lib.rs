#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// A world-space point or direction as `[x, y, z]`
pub type Vec3 = [f32; 3];

fn distance(a: &Vec3, b: &Vec3) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    libm::sqrtf(dx * dx + dy * dy + dz * dz)
}

/// One boid as handed to a renderer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AgentSnapshot {
    pub index: usize,
    pub position: Vec3,
    pub velocity: Vec3,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ObstacleSnapshot {
    pub index: usize,
    pub position: Vec3,
    pub radius: f32,
}

/// Attraction point state. `health` is absent while the target is inactive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MouseTargetStatus {
    pub coordinate: Vec3,
    pub health: Option<f32>,
}

impl MouseTargetStatus {
    pub fn is_active(&self) -> bool {
        self.health.is_some()
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub agents: Vec<AgentSnapshot>,
    pub obstacles: Vec<ObstacleSnapshot>,
    pub mouse_target: MouseTargetStatus,
}

impl FrameSnapshot {
    /// Mean distance from the agents to the mouse target, if it is active.
    pub fn mean_distance_to_target(&self) -> Option<f32> {
        if !self.mouse_target.is_active() || self.agents.is_empty() {
            return None;
        }
        let total: f32 = self
            .agents
            .iter()
            .map(|agent| distance(&agent.position, &self.mouse_target.coordinate))
            .sum();
        Some(total / self.agents.len() as f32)
    }
}

/// Tunable flock settings, loadable from JSON. Missing fields take defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockSettings {
    pub zone_inner: f32,
    pub zone_outer: f32,
    pub max_neighbours_checked: usize,
    pub vision_half_angle_deg: f32,
    pub vision_half_angle_restricted_deg: f32,
    pub obstacle_radius: f32,
    pub speed: f32,
    pub mouse_target_life_ms: u64,
    pub avoidance_priority: f32,
    pub cohesion_weight: f32,
    pub alignment_weight: f32,
    pub separation_weight: f32,
    pub boundary_weight: f32,
    pub mouse_weight: f32,
    pub obstacle_weight: f32,
}

impl Default for FlockSettings {
    fn default() -> Self {
        Self {
            zone_inner: 1.0,
            zone_outer: 2.0,
            max_neighbours_checked: 20,
            vision_half_angle_deg: 160.0,
            vision_half_angle_restricted_deg: 15.0,
            obstacle_radius: 1.5,
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

#[cfg(feature = "std")]
impl FlockSettings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
