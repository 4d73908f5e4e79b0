//! # Track
//!
//! The authored base track: a sparse loop of control points which is densified
//! into the waypoint path used by navigation control.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::info;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::path::Path;
use util::params;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters describing the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackParams {
    /// Control points of the track loop in the world frame.
    ///
    /// Units: meters
    pub base_points_m: Vec<[f64; 3]>,

    /// Number of points inserted between each pair of control points.
    pub points_per_segment: usize,
}

/// A validated track.
#[derive(Debug, Clone)]
pub struct Track {
    base: Path,
    points_per_segment: usize,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("Failed to load the track parameters: {0}")]
    ParamLoadError(params::LoadError),

    #[error("The track has no control points")]
    NoPoints,

    #[error("Track control point {0} is not finite")]
    NonFinitePoint(usize),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for TrackParams {
    /// The default circuit, with control points at car height.
    fn default() -> Self {
        Self {
            base_points_m: vec![
                [0.0, 0.1, 0.0],
                [3.0, 0.1, 12.0],
                [20.58, 0.1, 14.78],
                [37.43, 0.1, 14.07],
                [43.74, 0.1, 23.56],
                [35.38, 0.1, 34.9],
                [23.2, 0.1, 31.9],
                [21.9, 0.1, 25.0],
                [20.33, 0.1, -20.0],
                [10.5, 0.1, -27.0],
                [-1.46, 0.1, -18.65],
            ],
            points_per_segment: 1,
        }
    }
}

impl Track {
    /// Load the track from a parameter file relative to the parameters
    /// directory.
    pub fn init(params_path: &str) -> Result<Self, TrackError> {
        let params: TrackParams = params::load(params_path).map_err(TrackError::ParamLoadError)?;

        let track = Self::from_params(params)?;

        info!(
            "Track loaded from {} with {} control points",
            params_path,
            track.base.get_num_points()
        );

        Ok(track)
    }

    pub fn from_params(params: TrackParams) -> Result<Self, TrackError> {
        if params.base_points_m.is_empty() {
            return Err(TrackError::NoPoints);
        }

        for (i, p) in params.base_points_m.iter().enumerate() {
            if p.iter().any(|c| !c.is_finite()) {
                return Err(TrackError::NonFinitePoint(i));
            }
        }

        Ok(Self {
            base: Path::from_points(
                params
                    .base_points_m
                    .iter()
                    .map(|p| Vector3::new(p[0], p[1], p[2]))
                    .collect(),
            ),
            points_per_segment: params.points_per_segment,
        })
    }

    /// The densified waypoint path to follow.
    pub fn waypoints(&self) -> Path {
        self.base.interpolate(self.points_per_segment)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_track() {
        let track = Track::from_params(TrackParams::default()).unwrap();
        let path = track.waypoints();

        assert_eq!(track.base.get_num_points(), 11);
        assert_eq!(path.get_num_points(), 22);
        assert_eq!(path.get_waypoint(2), Some(Vector3::new(3.0, 0.1, 12.0)));
        assert_eq!(path.get_waypoint(1), Some(Vector3::new(1.5, 0.1, 6.0)));
        assert!(path.points_m.iter().all(|p| p.y == 0.1));
    }

    #[test]
    fn test_load_track() {
        let params: TrackParams = util::params::load_from_str(
            "
            points_per_segment = 3
            base_points_m = [
                [0.0, 0.0, 0.0],
                [0.0, 0.0, 40.0],
            ]
            ",
        )
        .unwrap();

        let path = Track::from_params(params).unwrap().waypoints();
        assert_eq!(path.get_num_points(), 8);
        assert_eq!(path.get_waypoint(1), Some(Vector3::new(0.0, 0.0, 10.0)));
    }

    #[test]
    fn test_shipped_track() {
        let params: TrackParams = util::params::load_from_path(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../params/track.toml"
        ))
        .unwrap();

        assert_eq!(params, TrackParams::default());
    }

    #[test]
    fn test_invalid_track() {
        let params = TrackParams {
            base_points_m: vec![],
            points_per_segment: 1,
        };
        assert!(matches!(Track::from_params(params), Err(TrackError::NoPoints)));

        let params = TrackParams {
            base_points_m: vec![[0.0, 0.0, 0.0], [f64::INFINITY, 0.0, 0.0]],
            points_per_segment: 1,
        };
        assert!(matches!(
            Track::from_params(params),
            Err(TrackError::NonFinitePoint(1))
        ));
    }
}
