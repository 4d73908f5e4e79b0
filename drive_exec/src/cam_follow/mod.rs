//! # Camera follow module
//!
//! A trailing camera which eases towards a point offset from the car. The
//! offset can be zoomed in and out in discrete steps.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info};
use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};

// Internal
pub use params::*;

use crate::loc::{heading_of, Pose};
use util::maths::{clamp, lerp};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The follow camera.
#[derive(Debug, Clone)]
pub struct CamFollow {
    params: Params,

    /// Current offset from the car, changed by zooming
    offset_m: Vector3<f64>,
}

/// Position and orientation of the camera.
///
/// Yaw uses the same convention as the car heading, pitch is positive
/// looking up.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CamPose {
    pub position_m: Vector3<f64>,
    pub yaw_rad: f64,
    pub pitch_rad: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomDir {
    In,
    Out,
}

#[derive(Debug, thiserror::Error)]
pub enum CamFollowError {
    #[error("Failed to load CamFollow parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("Invalid CamFollow parameters: {0}")]
    InvalidParams(String),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl CamFollow {
    pub fn new(params: Params) -> Result<Self, CamFollowError> {
        params.validate()?;

        Ok(Self {
            params,
            offset_m: Vector3::from(params.default_offset_m),
        })
    }

    /// Initialise from a parameter file relative to the parameters directory.
    pub fn init(params_path: &str) -> Result<Self, CamFollowError> {
        let params: Params =
            util::params::load(params_path).map_err(CamFollowError::ParamLoadError)?;

        info!("CamFollow parameters loaded from {}", params_path);

        Self::new(params)
    }

    /// The current offset of the camera from the car
    pub fn offset(&self) -> Vector3<f64> {
        self.offset_m
    }

    /// Move the camera one step towards its target behind the car.
    pub fn step(&self, camera: &CamPose, car: &Pose) -> CamPose {
        let target_m = self.target(car);
        let a = self.params.smoothing;

        let position_m = Vector3::new(
            lerp(camera.position_m.x, target_m.x, a),
            lerp(camera.position_m.y, target_m.y, a),
            lerp(camera.position_m.z, target_m.z, a),
        );

        let (yaw_rad, pitch_rad) = self.aim(&position_m, car, camera);

        CamPose {
            position_m,
            yaw_rad,
            pitch_rad,
        }
    }

    /// Camera pose placed directly at its target, for the first frame.
    pub fn initial_pose(&self, car: &Pose) -> CamPose {
        let position_m = self.target(car);
        let (yaw_rad, pitch_rad) = self.aim(&position_m, car, &CamPose::default());

        CamPose {
            position_m,
            yaw_rad,
            pitch_rad,
        }
    }

    /// Zoom in or out by one step, keeping within the limits.
    ///
    /// Zooming in moves the camera towards the car along Z whichever side of
    /// the car it sits on.
    pub fn zoom(&mut self, dir: ZoomDir) {
        let sign = match dir {
            ZoomDir::In => -1.0,
            ZoomDir::Out => 1.0,
        };

        self.offset_m.z = clamp(
            self.offset_m.z + self.offset_m.z.signum() * sign * 2.0 * self.params.zoom_step_m,
            self.params.min_offset_z_m,
            self.params.max_offset_z_m,
        );
        self.offset_m.y = clamp(
            self.offset_m.y + sign * self.params.zoom_step_m,
            self.params.min_offset_y_m,
            self.params.max_offset_y_m,
        );

        debug!("Camera zoom {:?}, offset now {:?}", dir, self.offset_m.as_slice());
    }

    pub fn reset_offset(&mut self) {
        self.offset_m = Vector3::from(self.params.default_offset_m);
    }

    fn target(&self, car: &Pose) -> Vector3<f64> {
        let offset_m = match self.params.offset_frame {
            OffsetFrame::World => self.offset_m,
            OffsetFrame::CarRelative => {
                Rotation3::from_axis_angle(&Vector3::y_axis(), car.heading_rad) * self.offset_m
            }
        };

        car.position_m + offset_m
    }

    fn aim(&self, position_m: &Vector3<f64>, car: &Pose, previous: &CamPose) -> (f64, f64) {
        match self.params.aim {
            CamAim::Fixed { yaw_rad, pitch_rad } => (yaw_rad, pitch_rad),
            CamAim::LookAt => {
                let to_car = car.position_m - position_m;

                // Directly above or below the car yaw is undefined, keep the
                // last one
                match heading_of(&to_car) {
                    Some(yaw) => (yaw, to_car.y.atan2(to_car.x.hypot(to_car.z))),
                    None => (
                        previous.yaw_rad,
                        std::f64::consts::FRAC_PI_2.copysign(to_car.y),
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_zoom_limits() {
        let mut cam = CamFollow::new(Params::default()).unwrap();
        assert_eq!(cam.offset(), Vector3::new(2.0, 10.0, 11.0));

        cam.zoom(ZoomDir::In);
        assert_relative_eq!(cam.offset(), Vector3::new(2.0, 9.5, 10.0));

        for _ in 0..100 {
            cam.zoom(ZoomDir::In);
        }
        assert_relative_eq!(cam.offset(), Vector3::new(2.0, 5.0, 5.0));

        for _ in 0..100 {
            cam.zoom(ZoomDir::Out);
        }
        assert_relative_eq!(cam.offset(), Vector3::new(2.0, 20.0, 30.0));

        cam.reset_offset();
        assert_eq!(cam.offset(), Vector3::new(2.0, 10.0, 11.0));
    }

    #[test]
    fn test_zoom_behind_car() {
        let params = Params {
            default_offset_m: [0.0, 10.0, -10.0],
            min_offset_z_m: -30.0,
            max_offset_z_m: -5.0,
            offset_frame: OffsetFrame::CarRelative,
            ..Default::default()
        };
        let mut cam = CamFollow::new(params).unwrap();
        let start = cam.offset().norm();

        cam.zoom(ZoomDir::In);
        assert_relative_eq!(cam.offset(), Vector3::new(0.0, 9.5, -9.0));
        assert!(cam.offset().norm() < start);

        for _ in 0..100 {
            cam.zoom(ZoomDir::In);
        }
        assert_relative_eq!(cam.offset(), Vector3::new(0.0, 5.0, -5.0));

        for _ in 0..100 {
            cam.zoom(ZoomDir::Out);
        }
        assert_relative_eq!(cam.offset(), Vector3::new(0.0, 20.0, -30.0));
    }

    #[test]
    fn test_smoothing_converges_monotonically() {
        let cam = CamFollow::new(Params::default()).unwrap();
        let car = Pose::new(Vector3::new(20.0, 0.1, -5.0), 0.3);
        let target = car.position_m + Vector3::new(2.0, 10.0, 11.0);

        let mut pose = CamPose::default();
        let mut last_dist = (pose.position_m - target).norm();

        for _ in 0..200 {
            pose = cam.step(&pose, &car);
            let dist = (pose.position_m - target).norm();
            assert!(dist < last_dist);
            last_dist = dist;
        }

        assert!(last_dist < 1e-6);
    }

    #[test]
    fn test_first_step_is_lerp() {
        let cam = CamFollow::new(Params::default()).unwrap();
        let car = Pose::default();

        let pose = cam.step(&CamPose::default(), &car);
        assert_relative_eq!(pose.position_m, Vector3::new(0.2, 1.0, 1.1), epsilon = 1e-12);
    }

    #[test]
    fn test_look_at() {
        let params = Params {
            default_offset_m: [0.0, 10.0, -10.0],
            min_offset_z_m: -30.0,
            max_offset_z_m: -5.0,
            ..Default::default()
        };
        let cam = CamFollow::new(params).unwrap();
        let car = Pose::default();

        // Behind (-Z) and above the car, so looking along +Z and down 45 deg
        let pose = cam.initial_pose(&car);
        assert_relative_eq!(pose.position_m, Vector3::new(0.0, 10.0, -10.0));
        assert_relative_eq!(pose.yaw_rad, 0.0);
        assert_relative_eq!(pose.pitch_rad, -std::f64::consts::FRAC_PI_4);

        // Straight overhead keeps the previous yaw
        let params = Params {
            default_offset_m: [0.0, 10.0, 0.0],
            min_offset_z_m: -5.0,
            smoothing: 1.0,
            ..Default::default()
        };
        let cam = CamFollow::new(params).unwrap();
        let previous = CamPose {
            yaw_rad: 0.7,
            ..Default::default()
        };
        let pose = cam.step(&previous, &car);
        assert_relative_eq!(pose.yaw_rad, 0.7);
        assert_relative_eq!(pose.pitch_rad, -FRAC_PI_2);
    }

    #[test]
    fn test_fixed_aim() {
        let params = Params {
            aim: CamAim::Fixed {
                yaw_rad: 3.0,
                pitch_rad: -0.5,
            },
            ..Default::default()
        };
        let cam = CamFollow::new(params).unwrap();

        let pose = cam.step(&CamPose::default(), &Pose::new(Vector3::new(5.0, 0.0, 5.0), 1.0));
        assert_eq!(pose.yaw_rad, 3.0);
        assert_eq!(pose.pitch_rad, -0.5);
    }

    #[test]
    fn test_car_relative_offset() {
        let params = Params {
            default_offset_m: [0.0, 10.0, -10.0],
            min_offset_z_m: -30.0,
            max_offset_z_m: -5.0,
            offset_frame: OffsetFrame::CarRelative,
            ..Default::default()
        };
        let cam = CamFollow::new(params).unwrap();

        // Car facing +X, so "behind" is -X
        let car = Pose::new(Vector3::new(1.0, 0.0, 1.0), FRAC_PI_2);
        let pose = cam.initial_pose(&car);

        assert_relative_eq!(pose.position_m, Vector3::new(-9.0, 10.0, 1.0), epsilon = 1e-9);
        assert_relative_eq!(pose.yaw_rad, FRAC_PI_2, epsilon = 1e-9);
    }
}
