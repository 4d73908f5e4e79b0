//! # Drive library.
//!
//! Navigation core for a car driving around a track: manual driving, an
//! autonomous waypoint follower and a trailing camera. The `drive_exec`
//! binary runs these in a cycle loop driven by a command script.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Follow camera - eases a camera towards a point offset from the car
pub mod cam_follow;

/// Global data store for the executable
pub mod data_store;

/// Localisation - the pose of the car in the world
pub mod loc;

/// Navigation control - moves the car each tick, either manually or by following waypoints
pub mod nav_ctrl;

/// Waypoint paths and path interpolation
pub mod path;

/// Telecommands accepted by the drive executable
pub mod tc;

/// Telecommand processor
pub mod tc_processor;

/// The base track the waypoint path is built from
pub mod track;
