//! Main drive executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Telecommand processing (from a drive script)
//!         - Navigation control processing
//!         - Camera follow processing
//!         - Archive writing
//!     - Save a summary of the run to the session
//!
//! Without a script the car is switched into autonomous mode and the
//! executable stops once a full lap of the track has been driven.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use drive_lib::{
    cam_follow::{CamFollow, CamPose},
    data_store::DataStore,
    loc::Pose,
    nav_ctrl::{DriveMode, NavCtrl, NavState},
    tc::Tc,
    tc_processor,
    track::Track,
};
use util::{
    archive::Archiver,
    logger::{logger_init, LevelFilter},
    script_interpreter::ScriptInterpreter,
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Target period of one cycle.
const CYCLE_PERIOD_S: f64 = 1.0 / 60.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Command line options.
#[derive(Debug, StructOpt)]
#[structopt(name = "drive_exec", about = "Headless track drive executable")]
struct Opts {
    /// Drive script to execute. If not given the car drives one autonomous
    /// lap of the track. The drive carries on after the last command until a
    /// `Stop` command or the cycle limit.
    #[structopt(parse(from_os_str))]
    script: Option<PathBuf>,

    /// Stop after this many cycles even if the script or lap has not ended.
    #[structopt(long, default_value = "20000")]
    max_cycles: u64,

    /// Sleep for the remainder of each cycle rather than running as fast as
    /// possible.
    #[structopt(long)]
    realtime: bool,

    /// Log every NavCtrl tick.
    #[structopt(long)]
    trace: bool,
}

/// One row of the NavCtrl archive.
#[derive(Serialize)]
struct NavRecord {
    cycle: u64,
    sim_time_s: f64,
    mode: DriveMode,
    x_m: f64,
    y_m: f64,
    z_m: f64,
    heading_rad: f64,
    waypoint_index: usize,
    mode_changed: bool,
    distance_to_target_m: Option<f64>,
    heading_error_rad: Option<f64>,
    lateral_error_m: Option<f64>,
    arrived: bool,
    turn_applied: bool,
    bounds_clamped: bool,
}

/// One row of the camera archive.
#[derive(Serialize)]
struct CamRecord {
    cycle: u64,
    x_m: f64,
    y_m: f64,
    z_m: f64,
    yaw_rad: f64,
    pitch_rad: f64,
    offset_y_m: f64,
    offset_z_m: f64,
}

/// Summary of the run, saved at the end of the session.
#[derive(Serialize)]
struct RunSummary {
    num_cycles: u64,
    sim_time_s: f64,
    num_arrivals: u64,
    num_laps: u64,
    num_waypoints: usize,
    final_pose: Pose,
    final_nav_state: NavState,
    final_cam_pose: CamPose,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Various sources for the telecommands incoming to the exec.
enum TcSource {
    /// Timed commands from a script
    Script(ScriptInterpreter<Tc>),

    /// No commands, drive a single autonomous lap
    Lap,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("drive_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger, NavCtrl is very chatty at trace level so only enable
    // it on request
    let nav_level = if opts.trace {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    logger_init(
        LevelFilter::Trace,
        &[("drive_lib::nav_ctrl", nav_level)],
        &session,
    )
    .wrap_err("Failed to initialise logging")?;

    info!("Track Drive Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI options: {:?}", opts);

    // ---- INITIALISE TC SOURCE ----

    let mut tc_source = match opts.script {
        Some(ref path) => {
            info!("Loading script from {:?}", path);

            let si = ScriptInterpreter::new(path).wrap_err("Failed to load script")?;

            info!(
                "Loaded script lasts {:.02} s and contains {} TCs\n",
                si.get_duration(),
                si.get_num_cmds()
            );

            TcSource::Script(si)
        }
        None => {
            info!("No script provided, driving one autonomous lap\n");
            TcSource::Lap
        }
    };

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let nav_ctrl = NavCtrl::init("nav_ctrl.toml").wrap_err("Failed to initialise NavCtrl")?;
    info!("NavCtrl init complete");

    let mut cam_follow =
        CamFollow::init("cam_follow.toml").wrap_err("Failed to initialise CamFollow")?;
    info!("CamFollow init complete");

    let track = Track::init("track.toml").wrap_err("Failed to load the track")?;

    let mut ds = DataStore {
        path: track.waypoints(),
        ..Default::default()
    };
    ds.cam_pose = cam_follow.initial_pose(&ds.pose);

    info!(
        "Track has {} waypoints, {:.2} m per lap",
        ds.path.get_num_points(),
        ds.path.get_length().unwrap_or(0.0)
    );

    if let TcSource::Lap = tc_source {
        ds.nav_state.set_mode(DriveMode::Autonomous);
    }

    let mut arch_nav = Archiver::from_path(&session, "nav_ctrl/tick.csv")
        .wrap_err("Failed to create the NavCtrl archive")?;
    let mut arch_cam = Archiver::from_path(&session, "cam_follow/cam.csv")
        .wrap_err("Failed to create the CamFollow archive")?;

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    while ds.num_cycles < opts.max_cycles {
        let cycle_start_instant = Instant::now();

        ds.cycle_start(CYCLE_PERIOD_S);

        // ---- TELECOMMAND PROCESSING ----

        if let TcSource::Script(ref mut si) = tc_source {
            tc_processor::exec_script(&mut ds, &mut cam_follow, si);
        }

        // ---- CONTROL ALGORITHM PROCESSING ----

        let prev_index = ds.nav_state.waypoint_index;

        let (pose, nav_state, report) =
            nav_ctrl.step(ds.pose, &ds.nav_state, &ds.nav_input, &ds.path);
        ds.pose = pose;
        ds.nav_state = nav_state;
        ds.nav_status_rpt = report;

        ds.count_arrivals(prev_index);

        ds.cam_pose = cam_follow.step(&ds.cam_pose, &ds.pose);

        // ---- WRITE ARCHIVES ----

        if let Err(e) = arch_nav.serialise(NavRecord {
            cycle: ds.num_cycles,
            sim_time_s: ds.sim_time_s,
            mode: ds.nav_state.mode,
            x_m: ds.pose.position_m.x,
            y_m: ds.pose.position_m.y,
            z_m: ds.pose.position_m.z,
            heading_rad: ds.pose.heading_rad,
            waypoint_index: ds.nav_state.waypoint_index,
            mode_changed: report.mode_changed,
            distance_to_target_m: report.distance_to_target_m,
            heading_error_rad: report.heading_error_rad,
            lateral_error_m: report.lateral_error_m,
            arrived: report.arrived,
            turn_applied: report.turn_applied,
            bounds_clamped: report.bounds_clamped,
        }) {
            warn!("Could not write NavCtrl archive: {}", e);
        }

        let offset = cam_follow.offset();
        if let Err(e) = arch_cam.serialise(CamRecord {
            cycle: ds.num_cycles,
            x_m: ds.cam_pose.position_m.x,
            y_m: ds.cam_pose.position_m.y,
            z_m: ds.cam_pose.position_m.z,
            yaw_rad: ds.cam_pose.yaw_rad,
            pitch_rad: ds.cam_pose.pitch_rad,
            offset_y_m: offset.y,
            offset_z_m: offset.z,
        }) {
            warn!("Could not write CamFollow archive: {}", e);
        }

        // ---- CYCLE MANAGEMENT ----

        ds.num_cycles += 1;

        if let TcSource::Lap = tc_source {
            if ds.num_laps > 0 {
                info!("Lap complete, stopping");
                break;
            }
        }

        if ds.stop_requested {
            break;
        }

        if opts.realtime {
            let cycle_dur = Instant::now() - cycle_start_instant;

            match Duration::from_secs_f64(CYCLE_PERIOD_S).checked_sub(cycle_dur) {
                Some(d) => {
                    ds.record_cycle_overrun(false);
                    thread::sleep(d);
                }
                None => {
                    warn!(
                        "Cycle overran by {:.06} s",
                        cycle_dur.as_secs_f64() - CYCLE_PERIOD_S
                    );
                    ds.record_cycle_overrun(true);
                }
            }
        }
    }

    if ds.num_cycles >= opts.max_cycles {
        warn!("Maximum number of cycles ({}) reached", opts.max_cycles);
    }

    // ---- SHUTDOWN ----

    info!(
        "Drove {} cycles ({:.2} s), {} arrivals, {} laps",
        ds.num_cycles,
        ds.num_cycles as f64 * CYCLE_PERIOD_S,
        ds.num_arrivals,
        ds.num_laps
    );

    session.save(
        "summary.json",
        RunSummary {
            num_cycles: ds.num_cycles,
            sim_time_s: ds.num_cycles as f64 * CYCLE_PERIOD_S,
            num_arrivals: ds.num_arrivals,
            num_laps: ds.num_laps,
            num_waypoints: ds.path.get_num_points(),
            final_pose: ds.pose,
            final_nav_state: ds.nav_state,
            final_cam_pose: ds.cam_pose,
        },
    );

    session.exit();

    info!("End of execution");

    Ok(())
}
