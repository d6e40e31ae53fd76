use std::path::Path;

use anyhow::{ensure, Context, Result};
use flock_core::FlockConfig;
use flock_shared::FlockSettings;

/// Largest flock the driver agrees to build.
pub const MAX_BOIDS: usize = 100_000;
pub const MAX_OBSTACLES: usize = 10_000;

/// Read settings from a JSON file, or fall back to the defaults.
pub fn load_settings(path: Option<&Path>) -> Result<FlockSettings> {
    let Some(path) = path else {
        return Ok(FlockSettings::default());
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let settings = FlockSettings::from_json(&json)
        .with_context(|| format!("Malformed settings file {}", path.display()))?;

    log::info!("Loaded settings from {}", path.display());
    Ok(settings)
}

pub fn validate_settings(settings: &FlockSettings) -> Result<()> {
    ensure!(
        settings.speed.is_finite() && settings.speed > 0.0,
        "speed must be positive, got {}",
        settings.speed
    );
    ensure!(
        settings.zone_inner > 0.0 && settings.zone_inner < settings.zone_outer,
        "zone_inner ({}) must be positive and below zone_outer ({})",
        settings.zone_inner,
        settings.zone_outer
    );
    ensure!(
        settings.obstacle_radius > 0.0,
        "obstacle_radius must be positive, got {}",
        settings.obstacle_radius
    );
    ensure!(
        settings.mouse_target_life_ms > 0,
        "mouse_target_life_ms must be positive"
    );
    for (name, angle) in [
        ("vision_half_angle_deg", settings.vision_half_angle_deg),
        (
            "vision_half_angle_restricted_deg",
            settings.vision_half_angle_restricted_deg,
        ),
    ] {
        ensure!(
            angle > 0.0 && angle <= 180.0,
            "{} must be in (0, 180], got {}",
            name,
            angle
        );
    }
    for (name, value) in [
        ("avoidance_priority", settings.avoidance_priority),
        ("cohesion_weight", settings.cohesion_weight),
        ("alignment_weight", settings.alignment_weight),
        ("separation_weight", settings.separation_weight),
        ("boundary_weight", settings.boundary_weight),
        ("mouse_weight", settings.mouse_weight),
        ("obstacle_weight", settings.obstacle_weight),
    ] {
        ensure!(value.is_finite(), "{} must be finite, got {}", name, value);
    }
    Ok(())
}

pub fn validate_population(aspect_ratio: f32, boids: usize, obstacles: usize) -> Result<()> {
    ensure!(
        aspect_ratio.is_finite() && aspect_ratio > 0.0,
        "aspect ratio must be a positive number, got {}",
        aspect_ratio
    );
    ensure!(
        boids <= MAX_BOIDS,
        "at most {} boids are supported, got {}",
        MAX_BOIDS,
        boids
    );
    ensure!(
        obstacles <= MAX_OBSTACLES,
        "at most {} obstacles are supported, got {}",
        MAX_OBSTACLES,
        obstacles
    );
    Ok(())
}

pub fn to_config(settings: &FlockSettings) -> FlockConfig {
    FlockConfig {
        zone_inner: settings.zone_inner,
        zone_outer: settings.zone_outer,
        max_neighbours_checked: settings.max_neighbours_checked,
        vision_half_angle: settings.vision_half_angle_deg.to_radians(),
        vision_half_angle_restricted: settings.vision_half_angle_restricted_deg.to_radians(),
        obstacle_radius: settings.obstacle_radius,
        speed: settings.speed,
        mouse_target_life_ms: settings.mouse_target_life_ms,
        avoidance_priority: settings.avoidance_priority,
        cohesion_weight: settings.cohesion_weight,
        alignment_weight: settings.alignment_weight,
        separation_weight: settings.separation_weight,
        boundary_weight: settings.boundary_weight,
        mouse_weight: settings.mouse_weight,
        obstacle_weight: settings.obstacle_weight,
        ..FlockConfig::default()
    }
}
