//! Autonomous waypoint following
//!
//! Each tick the car either arrives at its current waypoint, advancing the
//! index without moving, or steers towards it by at most the turn step and
//! drives forward by a fixed step.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{debug, trace};

use super::{Params, StatusReport};
use crate::{
    loc::{heading_of, Pose},
    path::Path,
};
use util::maths::{clamp, normalise_angle};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Perform one autonomous tick.
///
/// Returns the new pose and waypoint index. An empty path leaves both
/// untouched.
pub(crate) fn proc_autonomous(
    pose: Pose,
    waypoint_index: usize,
    path: &Path,
    params: &Params,
    report: &mut StatusReport,
) -> (Pose, usize) {
    let index = match path.wrap_index(waypoint_index) {
        Some(i) => i,
        None => {
            report.path_empty = true;
            return (pose, waypoint_index);
        }
    };

    let target_m = path.points_m[index];
    let to_target = target_m - pose.position_m;
    let distance_m = to_target.norm();

    report.distance_to_target_m = Some(distance_m);
    report.lateral_error_m = path
        .get_segment_to_target(index)
        .map(|s| s.lateral_error(&pose.position_m));

    if distance_m < params.arrival_threshold_m {
        let next = path.next_index(index).unwrap_or(index);

        debug!(
            "Arrived at waypoint {} ({:.2} m away), next target {}",
            index, distance_m, next
        );

        report.arrived = true;
        return (pose, next);
    }

    let mut new_pose = pose;

    // Directly above or below the target there is no heading to steer to
    if let Some(desired_rad) = heading_of(&to_target) {
        let error_rad = normalise_angle(desired_rad - pose.heading_rad);
        report.heading_error_rad = Some(error_rad);

        if error_rad.abs() > params.heading_deadband_rad {
            let turn_rad = clamp(
                error_rad,
                -params.auto_turn_step_rad,
                params.auto_turn_step_rad,
            );
            new_pose = new_pose.turned(turn_rad);
            report.turn_applied = true;
        }
    }

    new_pose = new_pose.translated(params.auto_step_m);

    trace!(
        "Auto: target {} at {:.2} m, heading error {:?}",
        index,
        distance_m,
        report.heading_error_rad
    );

    (new_pose, index)
}
