//! Parameters structure for NavCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use util::maths::clamp;

use super::NavCtrlError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Navigation control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Params {

    // ---- MANUAL ----

    /// Distance travelled per tick while accelerate or reverse is held.
    ///
    /// Units: meters
    pub manual_step_m: f64,

    /// Heading change per tick while a steer input is held.
    ///
    /// Units: radians
    pub manual_turn_step_rad: f64,

    // ---- AUTONOMOUS ----

    /// Distance travelled per autonomous tick.
    ///
    /// Units: meters
    pub auto_step_m: f64,

    /// Maximum heading change per autonomous tick.
    ///
    /// Units: radians
    pub auto_turn_step_rad: f64,

    /// The car has arrived at a waypoint when it is strictly closer than this.
    ///
    /// Units: meters
    pub arrival_threshold_m: f64,

    /// Heading errors of this magnitude or less are not corrected.
    ///
    /// Units: radians
    pub heading_deadband_rad: f64,

    // ---- ARENA ----

    /// Bounds to keep the car within, or `None` for an unbounded arena.
    #[serde(default)]
    pub arena_bounds: Option<ArenaBounds>,
}

/// Rectangular bounds of the arena on the horizontal plane.
///
/// The car's footprint is kept inside the bounds, so its centre is limited to
/// the rectangle shrunk by the half width (in X) and half length (in Z).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub min_x_m: f64,
    pub max_x_m: f64,
    pub min_z_m: f64,
    pub max_z_m: f64,

    /// Half of the width of the car.
    ///
    /// Units: meters
    pub half_width_m: f64,

    /// Half of the length of the car.
    ///
    /// Units: meters
    pub half_length_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            manual_step_m: 0.15,
            manual_turn_step_rad: 0.015,
            auto_step_m: 0.15,
            auto_turn_step_rad: 0.015,
            arrival_threshold_m: 5.0,
            heading_deadband_rad: 0.05,
            arena_bounds: None,
        }
    }
}

impl Params {
    /// Check that the parameters describe a controller which can make
    /// progress.
    pub fn validate(&self) -> Result<(), NavCtrlError> {
        let positive = [
            ("manual_step_m", self.manual_step_m),
            ("manual_turn_step_rad", self.manual_turn_step_rad),
            ("auto_step_m", self.auto_step_m),
            ("auto_turn_step_rad", self.auto_turn_step_rad),
            ("arrival_threshold_m", self.arrival_threshold_m),
        ];

        for (name, value) in positive.iter() {
            if !value.is_finite() || *value <= 0.0 {
                return Err(NavCtrlError::InvalidParams(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }

        if !self.heading_deadband_rad.is_finite() || self.heading_deadband_rad < 0.0 {
            return Err(NavCtrlError::InvalidParams(format!(
                "heading_deadband_rad must be non-negative, got {}",
                self.heading_deadband_rad
            )));
        }

        if let Some(ref bounds) = self.arena_bounds {
            bounds.validate()?;
        }

        Ok(())
    }
}

impl ArenaBounds {
    /// Check that the car fits inside the bounds.
    pub fn validate(&self) -> Result<(), NavCtrlError> {
        if self.half_width_m < 0.0 || self.half_length_m < 0.0 {
            return Err(NavCtrlError::InvalidParams(
                "Arena car half dimensions must be non-negative".into(),
            ));
        }

        if self.max_x_m - self.min_x_m < 2.0 * self.half_width_m
            || self.max_z_m - self.min_z_m < 2.0 * self.half_length_m
        {
            return Err(NavCtrlError::InvalidParams(format!(
                "The car does not fit inside the arena bounds: {:?}",
                self
            )));
        }

        Ok(())
    }

    /// Clamp a position so that the car stays inside the bounds.
    ///
    /// Returns the clamped position and whether any clamping occured. The
    /// vertical component is never changed.
    pub fn clamp(&self, position_m: &Vector3<f64>) -> (Vector3<f64>, bool) {
        let x = clamp(
            position_m.x,
            self.min_x_m + self.half_width_m,
            self.max_x_m - self.half_width_m,
        );
        let z = clamp(
            position_m.z,
            self.min_z_m + self.half_length_m,
            self.max_z_m - self.half_length_m,
        );

        let clamped = Vector3::new(x, position_m.y, z);

        (clamped, clamped != *position_m)
    }
}
