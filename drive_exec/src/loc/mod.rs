//! # Localisation module
//!
//! Defines the pose of the car in the world frame.
//!
//! The world frame is Y-up. Heading is the signed rotation about the +Y axis,
//! with the forward direction given by `(sin(heading), 0, cos(heading))`, so a
//! heading of zero faces +Z and a positive heading turns towards +X.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Horizontal distance below which a direction is considered to have no
/// heading (the target is directly above or below).
const MIN_HORIZONTAL_DIST_M: f64 = 1e-9;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The current pose (position and heading in the world frame) of the car.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Pose {
    /// The position in the world frame
    pub position_m: Vector3<f64>,

    /// Rotation about the vertical axis. Not normalised, it accumulates
    /// however the car has been turned.
    pub heading_rad: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {
    pub fn new(position_m: Vector3<f64>, heading_rad: f64) -> Self {
        Self {
            position_m,
            heading_rad,
        }
    }

    /// Pose at `from` facing towards `to`.
    ///
    /// If `to` has no horizontal offset from `from` the heading is zero.
    pub fn facing(from: Vector3<f64>, to: Vector3<f64>) -> Self {
        Self {
            position_m: from,
            heading_rad: heading_of(&(to - from)).unwrap_or(0.0),
        }
    }

    /// Unit vector pointing in the direction the car is facing.
    pub fn forward(&self) -> Vector3<f64> {
        Vector3::new(self.heading_rad.sin(), 0.0, self.heading_rad.cos())
    }

    /// Return a copy of this pose translated by `dist_m` along its forward
    /// direction. Negative distances move backwards.
    pub fn translated(&self, dist_m: f64) -> Self {
        Self {
            position_m: self.position_m + self.forward() * dist_m,
            heading_rad: self.heading_rad,
        }
    }

    /// Return a copy of this pose turned by `delta_rad`.
    pub fn turned(&self, delta_rad: f64) -> Self {
        Self {
            position_m: self.position_m,
            heading_rad: self.heading_rad + delta_rad,
        }
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Heading of a direction vector, `atan2(x, z)`.
///
/// Only the horizontal components are used. Returns `None` if the direction
/// has no horizontal component.
pub fn heading_of(direction: &Vector3<f64>) -> Option<f64> {
    if direction.x.hypot(direction.z) < MIN_HORIZONTAL_DIST_M {
        None
    } else {
        Some(direction.x.atan2(direction.z))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_forward_convention() {
        assert_relative_eq!(Pose::default().forward(), Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(
            Pose::new(Vector3::zeros(), FRAC_PI_2).forward(),
            Vector3::new(1.0, 0.0, 0.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            Pose::new(Vector3::zeros(), PI).forward(),
            Vector3::new(0.0, 0.0, -1.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_heading_of_matches_forward() {
        for &h in &[0.0, 0.3, -1.2, 2.9, -3.1] {
            let pose = Pose::new(Vector3::new(1.0, 2.0, 3.0), h);
            assert_relative_eq!(heading_of(&pose.forward()).unwrap(), h, epsilon = 1e-12);
        }

        assert!(heading_of(&Vector3::new(0.0, 5.0, 0.0)).is_none());
    }

    #[test]
    fn test_facing() {
        let pose = Pose::facing(Vector3::new(0.0, 0.1, 0.0), Vector3::new(3.0, 0.1, 12.0));
        assert_relative_eq!(pose.heading_rad, 3f64.atan2(12.0));
        assert_eq!(pose.position_m, Vector3::new(0.0, 0.1, 0.0));

        let pose = Pose::facing(Vector3::zeros(), Vector3::zeros());
        assert_eq!(pose.heading_rad, 0.0);
    }

    #[test]
    fn test_translated_and_turned() {
        let pose = Pose::default().translated(0.15);
        assert_relative_eq!(pose.position_m, Vector3::new(0.0, 0.0, 0.15));

        let pose = pose.translated(-0.3);
        assert_relative_eq!(pose.position_m, Vector3::new(0.0, 0.0, -0.15), epsilon = 1e-12);

        let pose = pose.turned(0.015).turned(0.015);
        assert_relative_eq!(pose.heading_rad, 0.03, epsilon = 1e-12);
    }
}
