//! Implementations for the NavCtrl state structures

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::info;
use serde::{Deserialize, Serialize};

// Internal
use super::{advance_with_report, NavCtrlError, Params};
use crate::{loc::Pose, path::Path};
use util::params;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Navigation control module.
///
/// Only holds the parameters, all state is passed in and out of [`step`]
/// by the caller.
///
/// [`step`]: NavCtrl::step
#[derive(Debug, Default, Clone)]
pub struct NavCtrl {
    pub(crate) params: Params,
}

/// Navigation state carried between ticks by the caller.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavState {
    /// The active driving mode
    pub mode: DriveMode,

    /// Index of the waypoint being driven towards, always less than the
    /// length of the path while autonomous.
    pub waypoint_index: usize,

    /// Mode requested by the operator, applied at the start of the next tick.
    pub pending_mode: Option<DriveMode>,
}

/// The operator's driving inputs for one tick.
///
/// All flags are independent, so e.g. holding both accelerate and reverse
/// leaves the car where it is.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSnapshot {
    pub accelerate: bool,
    pub reverse: bool,
    pub steer_left: bool,
    pub steer_right: bool,
}

/// Status report for NavCtrl processing.
///
/// Monitoring only, nothing in here is fed back into the controller.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct StatusReport {
    /// A pending mode change was applied this tick
    pub mode_changed: bool,

    /// Distance to the current target at the start of the tick
    pub distance_to_target_m: Option<f64>,

    /// Normalised heading error towards the target before any turn
    pub heading_error_rad: Option<f64>,

    /// Distance from the car to the line through the current path segment
    pub lateral_error_m: Option<f64>,

    /// The car arrived at its target this tick
    pub arrived: bool,

    /// A heading correction was applied this tick
    pub turn_applied: bool,

    /// The arena bounds limited the car's position this tick
    pub bounds_clamped: bool,

    /// The path was empty, so autonomous mode could do nothing
    pub path_empty: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Driving mode of the car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveMode {
    /// Driven directly from the operator's [`InputSnapshot`]
    Manual,

    /// Following the waypoint path
    Autonomous,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for DriveMode {
    fn default() -> Self {
        DriveMode::Manual
    }
}

impl NavState {
    /// Request a change of driving mode.
    ///
    /// The change takes effect on the next tick, which is consumed by the
    /// transition. Requesting the mode that is already active clears any
    /// other pending request.
    pub fn set_mode(&mut self, mode: DriveMode) {
        self.pending_mode = if mode == self.mode {
            None
        } else {
            Some(mode)
        };
    }

    /// Request the opposite of the current mode.
    pub fn toggle_mode(&mut self) {
        let mode = match self.mode {
            DriveMode::Manual => DriveMode::Autonomous,
            DriveMode::Autonomous => DriveMode::Manual,
        };

        self.set_mode(mode);
    }
}

impl InputSnapshot {
    /// True if any input is held
    pub fn any(&self) -> bool {
        self.accelerate || self.reverse || self.steer_left || self.steer_right
    }
}

impl NavCtrl {
    pub fn new(params: Params) -> Result<Self, NavCtrlError> {
        params.validate()?;

        Ok(Self { params })
    }

    /// Initialise NavCtrl from a parameter file relative to the parameters
    /// directory.
    pub fn init(params_path: &str) -> Result<Self, NavCtrlError> {
        let params: Params =
            params::load(params_path).map_err(NavCtrlError::ParamLoadError)?;

        info!("NavCtrl parameters loaded from {}", params_path);

        Self::new(params)
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Perform one tick of navigation control.
    pub fn step(
        &self,
        pose: Pose,
        state: &NavState,
        input: &InputSnapshot,
        path: &Path,
    ) -> (Pose, NavState, StatusReport) {
        advance_with_report(pose, state, input, path, &self.params)
    }
}
