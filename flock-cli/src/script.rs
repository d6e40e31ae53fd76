use anyhow::{bail, ensure, Context, Result};
use flock_core::Vector3D;

/// Event fed to the flock's mouse target before a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Activate,
    Release,
}

/// Scripted stand-in for a pointer: where the target sits, how it drifts
/// each tick, and when it is pressed and released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseScript {
    pub target: Vector3D,
    pub drift: Vector3D,
    pub press_at: Option<u64>,
    pub release_at: Option<u64>,
}

impl MouseScript {
    pub fn new(
        target: Vector3D,
        drift: Vector3D,
        press_at: Option<u64>,
        release_at: Option<u64>,
    ) -> Result<Self> {
        match (press_at, release_at) {
            (None, Some(_)) => bail!("--release-at needs --press-at"),
            (Some(press), Some(release)) => ensure!(
                release > press,
                "release tick {} must come after press tick {}",
                release,
                press
            ),
            _ => {}
        }

        Ok(Self {
            target,
            drift,
            press_at,
            release_at,
        })
    }

    pub fn action_at(&self, tick: u64) -> Option<MouseAction> {
        if self.press_at == Some(tick) {
            Some(MouseAction::Activate)
        } else if self.release_at == Some(tick) {
            Some(MouseAction::Release)
        } else {
            None
        }
    }
}

impl Default for MouseScript {
    fn default() -> Self {
        Self {
            target: Vector3D::zero(),
            drift: Vector3D::zero(),
            press_at: None,
            release_at: None,
        }
    }
}

/// Parse `x,y,z` (whitespace around components is allowed).
pub fn parse_vec3(text: &str) -> Result<Vector3D> {
    let components = text
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f32>()
                .with_context(|| format!("'{}' is not a number", part.trim()))
        })
        .collect::<Result<Vec<f32>>>()
        .with_context(|| format!("Invalid vector '{}'", text))?;

    match components.as_slice() {
        [x, y, z] if x.is_finite() && y.is_finite() && z.is_finite() => {
            Ok(Vector3D::new(*x, *y, *z))
        }
        [_, _, _] => bail!("Vector '{}' has non-finite components", text),
        _ => bail!("Expected three components in '{}'", text),
    }
}
