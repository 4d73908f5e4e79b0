//! # Drive telecommands
//!
//! Commands which can be sent to the drive executable, from a drive script or
//! any other source of operator input.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::{
    cam_follow::ZoomDir,
    nav_ctrl::{DriveMode, InputSnapshot},
};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A telecommand.
///
/// In JSON a command is written as `{"type": "SetMode", "payload":
/// "Autonomous"}`, commands without data omit the payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Tc {
    /// Request a driving mode, applied on the next cycle
    SetMode(DriveMode),

    /// Request the opposite of the current driving mode
    ToggleMode,

    /// Set the held inputs. They stay held until the next `Input` command.
    Input(InputSnapshot),

    /// Zoom the follow camera by one step
    Zoom(ZoomDir),

    /// Return the camera offset to its default
    ResetCamera,

    /// Stop the executable at the end of the cycle
    Stop,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_tc_json() {
        let tc: Tc = serde_json::from_str("{\"type\": \"SetMode\", \"payload\": \"Autonomous\"}")
            .unwrap();
        assert_eq!(tc, Tc::SetMode(DriveMode::Autonomous));

        let tc: Tc = serde_json::from_str(
            "{\"type\": \"Input\", \"payload\": {\"accelerate\": true, \"steer_right\": true}}",
        )
        .unwrap();
        assert_eq!(
            tc,
            Tc::Input(InputSnapshot {
                accelerate: true,
                steer_right: true,
                ..Default::default()
            })
        );

        let tc: Tc = serde_json::from_str("{\"type\": \"Zoom\", \"payload\": \"In\"}").unwrap();
        assert_eq!(tc, Tc::Zoom(ZoomDir::In));

        let tc: Tc = serde_json::from_str("{\"type\": \"Stop\"}").unwrap();
        assert_eq!(tc, Tc::Stop);

        assert!(serde_json::from_str::<Tc>("{\"type\": \"Fly\"}").is_err());
    }

    #[test]
    fn test_shipped_scripts() {
        use util::script_interpreter::ScriptInterpreter;

        for name in &["lap.drv", "manual.drv"] {
            let path = format!("{}/../scripts/{}", env!("CARGO_MANIFEST_DIR"), name);
            let si: ScriptInterpreter<Tc> = ScriptInterpreter::new(&path).unwrap();
            assert!(si.get_num_cmds() > 0);
        }
    }
}
