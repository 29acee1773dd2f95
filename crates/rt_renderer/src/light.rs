//! Point lights.

use rt_math::Vec3;
use serde::{Deserialize, Serialize};

/// An isotropic point light. Intensity does not fall off with distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
    pub intensity: f64,
}

impl Light {
    /// Create a new point light.
    pub fn new(position: Vec3, intensity: f64) -> Self {
        Self { position, intensity }
    }
}
