//! Mode transitions

use log::{info, warn};

use super::{DriveMode, NavState};
use crate::{loc::Pose, path::Path};

/// Apply a change of mode, returning the pose and state the car is left in.
///
/// Entering autonomous mode restarts the path: the index is reset to zero and
/// the car is placed on the first waypoint facing the second. With fewer than
/// two waypoints the heading is kept, and with none the car is not moved.
/// Leaving autonomous mode keeps everything as it is.
pub(crate) fn apply_transition(
    pose: Pose,
    state: &NavState,
    mode: DriveMode,
    path: &Path,
) -> (Pose, NavState) {
    let mut new_state = NavState {
        mode,
        waypoint_index: state.waypoint_index,
        pending_mode: None,
    };

    let new_pose = match mode {
        DriveMode::Autonomous => {
            new_state.waypoint_index = 0;

            match path.get_waypoint(0) {
                None => {
                    warn!("Entering autonomous mode with an empty path, the car will not move");
                    pose
                }
                Some(start_m) if path.get_num_points() > 1 => {
                    Pose::facing(start_m, path.points_m[1])
                }
                Some(start_m) => Pose::new(start_m, pose.heading_rad),
            }
        }
        DriveMode::Manual => pose,
    };

    info!("Drive mode changed from {:?} to {:?}", state.mode, mode);

    (new_pose, new_state)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_enter_autonomous_snaps() {
        let path = Path::from_points(vec![
            Vector3::new(0.0, 0.1, 0.0),
            Vector3::new(3.0, 0.1, 12.0),
            Vector3::new(20.0, 0.1, 14.0),
        ]);
        let state = NavState {
            waypoint_index: 2,
            ..Default::default()
        };
        let pose = Pose::new(Vector3::new(-30.0, 0.1, 20.0), -2.0);

        let (new_pose, new_state) =
            apply_transition(pose, &state, DriveMode::Autonomous, &path);

        assert_eq!(new_state.mode, DriveMode::Autonomous);
        assert_eq!(new_state.waypoint_index, 0);
        assert_eq!(new_state.pending_mode, None);
        assert_eq!(new_pose.position_m, Vector3::new(0.0, 0.1, 0.0));
        assert_relative_eq!(new_pose.heading_rad, 3f64.atan2(12.0));
    }

    #[test]
    fn test_enter_autonomous_single_and_empty() {
        let pose = Pose::new(Vector3::new(5.0, 0.0, 5.0), 1.2);
        let state = NavState::default();

        let path = Path::from_points(vec![Vector3::new(1.0, 0.0, 1.0)]);
        let (new_pose, _) = apply_transition(pose, &state, DriveMode::Autonomous, &path);
        assert_eq!(new_pose, Pose::new(Vector3::new(1.0, 0.0, 1.0), 1.2));

        let (new_pose, new_state) =
            apply_transition(pose, &state, DriveMode::Autonomous, &Path::new_empty());
        assert_eq!(new_pose, pose);
        assert_eq!(new_state.mode, DriveMode::Autonomous);
        assert_eq!(new_state.waypoint_index, 0);
    }

    #[test]
    fn test_leave_autonomous_keeps_pose() {
        let path = Path::from_points(vec![Vector3::zeros(), Vector3::new(0.0, 0.0, 10.0)]);
        let state = NavState {
            mode: DriveMode::Autonomous,
            waypoint_index: 1,
            pending_mode: Some(DriveMode::Manual),
        };
        let pose = Pose::new(Vector3::new(0.0, 0.0, 4.0), 0.1);

        let (new_pose, new_state) = apply_transition(pose, &state, DriveMode::Manual, &path);

        assert_eq!(new_pose, pose);
        assert_eq!(new_state.mode, DriveMode::Manual);
        assert_eq!(new_state.waypoint_index, 1);
        assert_eq!(new_state.pending_mode, None);
    }
}
