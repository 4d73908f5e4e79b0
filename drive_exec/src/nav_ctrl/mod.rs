//! # Navigation control module
//!
//! Navigation control decides, once per tick, how the car moves. In
//! `Manual` mode the operator's inputs turn and drive the car directly. In
//! `Autonomous` mode the car seeks the current waypoint of a closed loop path,
//! turning by a limited step towards it and driving forward, and moves on to
//! the next waypoint once it is within the arrival threshold.
//!
//! The controller holds no state between ticks. The caller owns the
//! [`Pose`](crate::loc::Pose) and [`NavState`] and passes them through
//! [`advance`] (or [`NavCtrl::step`]) each tick.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod autonomous;
mod manual;
mod params;
mod state;
mod transition;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;

// Internal
pub use params::*;
pub use state::*;

use crate::{loc::Pose, path::Path};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur while setting up NavCtrl.
///
/// Processing itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum NavCtrlError {
    #[error("Failed to load NavCtrl parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("Invalid NavCtrl parameters: {0}")]
    InvalidParams(String),
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Advance the car by one tick.
///
/// See [`advance_with_report`].
pub fn advance(
    pose: Pose,
    state: &NavState,
    input: &InputSnapshot,
    path: &Path,
    params: &Params,
) -> (Pose, NavState) {
    let (pose, state, _) = advance_with_report(pose, state, input, path, params);
    (pose, state)
}

/// Advance the car by one tick, also returning a status report describing
/// what happened.
///
/// A pending mode change is applied first and consumes the tick. Otherwise
/// the active mode moves the car, and if arena bounds are set any change in
/// position is clamped to them.
pub fn advance_with_report(
    pose: Pose,
    state: &NavState,
    input: &InputSnapshot,
    path: &Path,
    params: &Params,
) -> (Pose, NavState, StatusReport) {
    let mut report = StatusReport::default();

    if let Some(mode) = state.pending_mode {
        if mode != state.mode {
            let (new_pose, new_state) = transition::apply_transition(pose, state, mode, path);
            report.mode_changed = true;

            return (new_pose, new_state, report);
        }
    }

    let mut new_state = NavState {
        pending_mode: None,
        ..*state
    };

    let mut new_pose = match state.mode {
        DriveMode::Manual => manual::proc_manual(pose, input, params),
        DriveMode::Autonomous => {
            let (p, index) = autonomous::proc_autonomous(
                pose,
                state.waypoint_index,
                path,
                params,
                &mut report,
            );
            new_state.waypoint_index = index;
            p
        }
    };

    if let Some(ref bounds) = params.arena_bounds {
        if new_pose.position_m != pose.position_m {
            let (position_m, clamped) = bounds.clamp(&new_pose.position_m);
            new_pose.position_m = position_m;
            report.bounds_clamped = clamped;
        }
    }

    trace!(
        "NavCtrl {:?}: pos {:?}, heading {:.4} rad, target {}",
        new_state.mode,
        new_pose.position_m.as_slice(),
        new_pose.heading_rad,
        new_state.waypoint_index
    );

    (new_pose, new_state, report)
}
