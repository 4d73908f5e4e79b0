//! # Telecommand processor module
//!
//! The telecommand processor handles drive TCs coming from any source.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info};

// Internal
use crate::{cam_follow::CamFollow, data_store::DataStore, tc::Tc};
use util::script_interpreter::{PendingCmds, ScriptInterpreter};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute a telecommand.
///
/// Mutates the datastore (and the camera for zoom commands).
pub fn exec(ds: &mut DataStore, cam: &mut CamFollow, tc: &Tc) {
    match tc {
        Tc::SetMode(m) => {
            debug!("Recieved SetMode({:?}) command", m);
            ds.nav_state.set_mode(*m);
        }
        Tc::ToggleMode => {
            debug!("Recieved ToggleMode command");
            ds.nav_state.toggle_mode();
        }
        Tc::Input(i) => ds.nav_input = *i,
        Tc::Zoom(d) => cam.zoom(*d),
        Tc::ResetCamera => cam.reset_offset(),
        Tc::Stop => {
            info!("Stop command recieved");
            ds.stop_requested = true;
        }
    }
}

/// Execute the script commands due at the current simulation time.
///
/// Reaching the end of the script does not stop the executable, only a `Stop`
/// command or the cycle limit does.
pub fn exec_script(ds: &mut DataStore, cam: &mut CamFollow, si: &mut ScriptInterpreter<Tc>) {
    match si.get_pending_cmds(ds.sim_time_s) {
        PendingCmds::None => (),
        PendingCmds::Some(tc_vec) => {
            for tc in tc_vec.iter() {
                exec(ds, cam, tc);
            }
        }
        PendingCmds::EndOfScript => {
            if !ds.script_ended {
                info!("End of TC script reached, running until stopped");
                ds.script_ended = true;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        cam_follow::{Params, ZoomDir},
        nav_ctrl::{DriveMode, InputSnapshot},
    };

    #[test]
    fn test_exec() {
        let mut ds = DataStore::default();
        let mut cam = CamFollow::new(Params::default()).unwrap();

        exec(&mut ds, &mut cam, &Tc::SetMode(DriveMode::Autonomous));
        assert_eq!(ds.nav_state.pending_mode, Some(DriveMode::Autonomous));

        let input = InputSnapshot {
            reverse: true,
            ..Default::default()
        };
        exec(&mut ds, &mut cam, &Tc::Input(input));
        assert_eq!(ds.nav_input, input);

        exec(&mut ds, &mut cam, &Tc::Zoom(ZoomDir::Out));
        assert_eq!(cam.offset().z, 12.0);
        exec(&mut ds, &mut cam, &Tc::ResetCamera);
        assert_eq!(cam.offset().z, 11.0);

        assert!(!ds.stop_requested);
        exec(&mut ds, &mut cam, &Tc::Stop);
        assert!(ds.stop_requested);
    }

    #[test]
    fn test_script_end_keeps_running() {
        let mut ds = DataStore::default();
        let mut cam = CamFollow::new(Params::default()).unwrap();
        let mut si: ScriptInterpreter<Tc> = ScriptInterpreter::from_script(
            "1.0: {\"type\": \"SetMode\", \"payload\": \"Autonomous\"};",
        )
        .unwrap();

        exec_script(&mut ds, &mut cam, &mut si);
        assert_eq!(ds.nav_state.pending_mode, None);

        ds.sim_time_s = 1.0;
        exec_script(&mut ds, &mut cam, &mut si);
        assert_eq!(ds.nav_state.pending_mode, Some(DriveMode::Autonomous));
        assert!(!ds.script_ended);

        // Last command done, the drive carries on
        ds.sim_time_s = 1.5;
        exec_script(&mut ds, &mut cam, &mut si);
        assert!(ds.script_ended);
        assert!(!ds.stop_requested);

        ds.sim_time_s = 2.0;
        exec_script(&mut ds, &mut cam, &mut si);
        assert!(ds.script_ended);
        assert!(!ds.stop_requested);
    }
}
