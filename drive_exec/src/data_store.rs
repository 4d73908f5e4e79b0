//! # Data Store

use log::{info, warn};

use crate::{
    cam_follow::CamPose,
    loc::Pose,
    nav_ctrl::{InputSnapshot, NavState, StatusReport},
    path::Path,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of consecutive cycle overruns after which realtime pacing is
/// reported as lost.
const MAX_CONSEC_CYCLE_OVERRUNS: u64 = 120;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u64,

    /// Simulation elapsed time, advanced by one cycle period each cycle
    pub sim_time_s: f64,

    /// Set when the executable should exit at the end of the cycle
    pub stop_requested: bool,

    /// Set once every command of the drive script has been executed
    pub script_ended: bool,

    // Car
    pub pose: Pose,

    // NavCtrl
    pub nav_state: NavState,
    pub nav_input: InputSnapshot,
    pub nav_status_rpt: StatusReport,
    pub path: Path,

    // Camera
    pub cam_pose: CamPose,

    // Monitoring counters
    /// Number of waypoint arrivals since the start of the session
    pub num_arrivals: u64,

    /// Number of completed laps of the path
    pub num_laps: u64,

    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Perform actions required at the start of a cycle.
    ///
    /// Clears the status report and advances the simulation time.
    pub fn cycle_start(&mut self, cycle_period_s: f64) {
        self.nav_status_rpt = StatusReport::default();
        self.sim_time_s = self.num_cycles as f64 * cycle_period_s;
    }

    /// Record whether the last cycle overran its period.
    ///
    /// Returns true on the cycle where the number of consecutive overruns
    /// reaches the limit.
    pub fn record_cycle_overrun(&mut self, overran: bool) -> bool {
        if !overran {
            self.num_consec_cycle_overruns = 0;
            return false;
        }

        self.num_consec_cycle_overruns += 1;

        if self.num_consec_cycle_overruns == MAX_CONSEC_CYCLE_OVERRUNS {
            warn!(
                "{} consecutive cycle overruns, realtime pacing has been lost",
                self.num_consec_cycle_overruns
            );
            return true;
        }

        false
    }

    /// Update the monitoring counters from this cycle's status report.
    ///
    /// `prev_index` is the waypoint index before NavCtrl ran. A lap is counted
    /// when the car arrives at the last waypoint and wraps back to the first.
    pub fn count_arrivals(&mut self, prev_index: usize) {
        if !self.nav_status_rpt.arrived {
            return;
        }

        self.num_arrivals += 1;

        if self.nav_state.waypoint_index == 0 && prev_index + 1 == self.path.get_num_points() {
            self.num_laps += 1;
            info!(
                "Lap {} complete after {} cycles",
                self.num_laps, self.num_cycles
            );
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_count_laps() {
        let mut ds = DataStore {
            path: Path::from_points(vec![Vector3::zeros(), Vector3::new(10.0, 0.0, 0.0)]),
            ..Default::default()
        };

        // No arrival, nothing counted
        ds.count_arrivals(0);
        assert_eq!(ds.num_arrivals, 0);

        ds.nav_status_rpt.arrived = true;
        ds.nav_state.waypoint_index = 1;
        ds.count_arrivals(0);
        assert_eq!((ds.num_arrivals, ds.num_laps), (1, 0));

        ds.nav_state.waypoint_index = 0;
        ds.count_arrivals(1);
        assert_eq!((ds.num_arrivals, ds.num_laps), (2, 1));

        ds.cycle_start(0.1);
        assert!(!ds.nav_status_rpt.arrived);
    }

    #[test]
    fn test_cycle_overruns() {
        let mut ds = DataStore::default();

        for _ in 0..MAX_CONSEC_CYCLE_OVERRUNS - 1 {
            assert!(!ds.record_cycle_overrun(true));
        }
        assert!(ds.record_cycle_overrun(true));

        // Only reported once per run of overruns
        assert!(!ds.record_cycle_overrun(true));
        assert_eq!(ds.num_consec_cycle_overruns, MAX_CONSEC_CYCLE_OVERRUNS + 1);

        assert!(!ds.record_cycle_overrun(false));
        assert_eq!(ds.num_consec_cycle_overruns, 0);
    }
}
