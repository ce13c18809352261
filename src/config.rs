//! JSON configuration for the viewer.
//!
//! Every field is optional; missing ones take their defaults.
//!
//! ```json
//! {
//!     "parameters": {
//!         "particle_count": 80000,
//!         "branches": 4,
//!         "inside_color": "#ff6030",
//!         "outside_color": [0.1, 0.2, 0.5]
//!     },
//!     "camera": { "min_distance": 2.0, "max_distance": 12.0 },
//!     "rotation_speed": 0.05,
//!     "seed": 42
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::OrbitCamera;
use crate::error::{ConfigError, ParamError};
use crate::params::{finite, Color, GalaxyParameters};
use crate::rotation::DEFAULT_ROTATION_SPEED;

fn default_rotation_speed() -> f32 {
    DEFAULT_ROTATION_SPEED
}

/// Orbit camera settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Starting distance from the centre.
    pub distance: f32,
    /// Starting elevation in radians.
    pub pitch: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let camera = OrbitCamera::new();
        let (min_distance, max_distance) = camera.limits();
        Self {
            min_distance,
            max_distance,
            distance: camera.distance(),
            pitch: camera.pitch,
            auto_rotate: camera.auto_rotate,
            auto_rotate_speed: camera.auto_rotate_speed,
        }
    }
}

impl CameraConfig {
    /// Build the camera, rejecting an inverted or non-positive zoom range and
    /// non-finite angles or speeds.
    pub fn build(&self) -> Result<OrbitCamera, ParamError> {
        finite("pitch", self.pitch)?;
        finite("auto_rotate_speed", self.auto_rotate_speed)?;
        let mut camera = OrbitCamera::new()
            .with_limits(self.min_distance, self.max_distance)?
            .with_distance(self.distance)
            .with_pitch(self.pitch);
        camera.auto_rotate = self.auto_rotate;
        camera.auto_rotate_speed = self.auto_rotate_speed;
        Ok(camera)
    }
}

/// Complete viewer configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GalaxyConfig {
    #[serde(default)]
    pub parameters: GalaxyParameters,
    #[serde(default)]
    pub camera: CameraConfig,
    /// Galaxy spin in radians per second.
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,
    /// Clear colour, also used for the no-GPU placeholder.
    #[serde(default = "default_background")]
    pub background: Color,
    /// Fixed seed for a reproducible galaxy; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_background() -> Color {
    Color::BLACK
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            parameters: GalaxyParameters::default(),
            camera: CameraConfig::default(),
            rotation_speed: DEFAULT_ROTATION_SPEED,
            background: Color::BLACK,
            seed: None,
        }
    }
}

impl GalaxyConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GalaxyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        self.parameters.validate()?;
        self.camera.build()?;
        if !self.rotation_speed.is_finite() {
            return Err(ParamError::NotFinite { field: "rotation_speed" });
        }
        if self.rotation_speed < 0.0 {
            return Err(ParamError::Negative {
                field: "rotation_speed",
                value: self.rotation_speed,
            });
        }
        self.background.validate()
    }
}
