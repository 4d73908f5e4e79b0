//! Parameters structure for CamFollow

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::CamFollowError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the follow camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Offset of the camera from the car before any zooming.
    ///
    /// Units: meters
    pub default_offset_m: [f64; 3],

    /// Fraction of the remaining distance to the target covered each tick,
    /// in `(0, 1]`.
    pub smoothing: f64,

    /// Change in offset height per zoom step. The depth changes by twice
    /// this.
    ///
    /// Units: meters
    pub zoom_step_m: f64,

    // ---- ZOOM LIMITS ----
    pub min_offset_y_m: f64,
    pub max_offset_y_m: f64,
    pub min_offset_z_m: f64,
    pub max_offset_z_m: f64,

    /// Frame the offset is expressed in
    pub offset_frame: OffsetFrame,

    /// How the camera is oriented
    pub aim: CamAim,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Frame in which the camera offset is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OffsetFrame {
    /// The offset is fixed in the world, the camera does not swing round as
    /// the car turns
    World,

    /// The offset is rotated with the car's heading
    CarRelative,
}

/// Orientation mode of the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CamAim {
    /// Constant orientation
    Fixed { yaw_rad: f64, pitch_rad: f64 },

    /// Point at the car every tick
    LookAt,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            default_offset_m: [2.0, 10.0, 11.0],
            smoothing: 0.1,
            zoom_step_m: 0.5,
            min_offset_y_m: 5.0,
            max_offset_y_m: 20.0,
            min_offset_z_m: 5.0,
            max_offset_z_m: 30.0,
            offset_frame: OffsetFrame::World,
            aim: CamAim::LookAt,
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<(), CamFollowError> {
        if self.smoothing.is_nan() || self.smoothing <= 0.0 || self.smoothing > 1.0 {
            return Err(CamFollowError::InvalidParams(format!(
                "smoothing must be in (0, 1], got {}",
                self.smoothing
            )));
        }

        if self.zoom_step_m.is_nan() || self.zoom_step_m < 0.0 {
            return Err(CamFollowError::InvalidParams(format!(
                "zoom_step_m must be non-negative, got {}",
                self.zoom_step_m
            )));
        }

        if self.min_offset_y_m > self.max_offset_y_m || self.min_offset_z_m > self.max_offset_z_m {
            return Err(CamFollowError::InvalidParams(
                "Zoom limits must have min <= max".into(),
            ));
        }

        Ok(())
    }
}
