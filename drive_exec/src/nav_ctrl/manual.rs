//! Manual driving

use super::{InputSnapshot, Params};
use crate::loc::Pose;

/// Apply one tick of operator input to the pose.
///
/// Steering is applied before translation, so a turn and a drive held
/// together move the car along the new heading.
pub(crate) fn proc_manual(pose: Pose, input: &InputSnapshot, params: &Params) -> Pose {
    if !input.any() {
        return pose;
    }

    let mut turn_rad = 0.0;
    if input.steer_left {
        turn_rad += params.manual_turn_step_rad;
    }
    if input.steer_right {
        turn_rad -= params.manual_turn_step_rad;
    }

    let mut dist_m = 0.0;
    if input.accelerate {
        dist_m += params.manual_step_m;
    }
    if input.reverse {
        dist_m -= params.manual_step_m;
    }

    let mut new_pose = pose;
    if turn_rad != 0.0 {
        new_pose = new_pose.turned(turn_rad);
    }
    if dist_m != 0.0 {
        new_pose = new_pose.translated(dist_m);
    }

    new_pose
}
