//! # Path
//!
//! This module defines the waypoint path followed by the autonomous
//! controller.
//!
//! A path is an ordered list of points in the world frame, treated as a
//! closed loop: the segment after the last point returns to the first. Any
//! index into the path is taken modulo its length.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A closed loop of waypoints defining the desired trajectory of the car.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct Path {
    pub points_m: Vec<Vector3<f64>>,
}

/// A segment between two neighbouring waypoints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSegment {
    /// The target of the segment
    pub target_m: Vector3<f64>,

    /// The start point of the segment (the waypoint before the target)
    pub start_m: Vector3<f64>,

    /// The length of the segment
    pub length_m: f64,

    /// Unit vector pointing in the direction of the segment, zero for a zero
    /// length segment
    pub direction: Vector3<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Path {
    /// Create a new empty path
    pub fn new_empty() -> Self {
        Path {
            points_m: Vec::new(),
        }
    }

    pub fn from_points(points_m: Vec<Vector3<f64>>) -> Self {
        Path { points_m }
    }

    /// Densify the path by inserting `points_per_segment` evenly spaced points
    /// into every segment, including the closing segment. See
    /// [`interpolate_path`].
    pub fn interpolate(&self, points_per_segment: usize) -> Self {
        Path {
            points_m: interpolate_path(&self.points_m, points_per_segment),
        }
    }

    /// Get the waypoint at `index`, wrapping around the loop.
    ///
    /// Returns `None` only if the path is empty.
    pub fn get_waypoint(&self, index: usize) -> Option<Vector3<f64>> {
        self.wrap_index(index).map(|i| self.points_m[i])
    }

    /// The index following `index` around the loop, `None` for an empty path.
    pub fn next_index(&self, index: usize) -> Option<usize> {
        self.wrap_index(index).map(|i| (i + 1) % self.points_m.len())
    }

    /// Take `index` modulo the length of the path.
    pub fn wrap_index(&self, index: usize) -> Option<usize> {
        match self.points_m.len() {
            0 => None,
            n => Some(index % n),
        }
    }

    /// Returns the path segment connecting the target point and the previous
    /// point, wrapping around the loop, so the segment to target 0 starts at
    /// the last point.
    ///
    /// If the path has fewer than two points no segment exists and `None` is
    /// returned.
    pub fn get_segment_to_target(&self, target_index: usize) -> Option<PathSegment> {
        let n = self.points_m.len();
        if n < 2 {
            return None;
        }

        let target_index = target_index % n;
        let start_index = (target_index + n - 1) % n;

        let target_m = self.points_m[target_index];
        let start_m = self.points_m[start_index];

        let delta = target_m - start_m;
        let length_m = delta.norm();

        let direction = if length_m > 0.0 {
            delta / length_m
        } else {
            Vector3::zeros()
        };

        Some(PathSegment {
            target_m,
            start_m,
            length_m,
            direction,
        })
    }

    /// Return the length of the closed loop in meters.
    ///
    /// If the path has fewer than two points then `None` is returned.
    pub fn get_length(&self) -> Option<f64> {
        if self.points_m.len() < 2 {
            return None;
        }

        Some(
            (0..self.points_m.len())
                .filter_map(|i| self.get_segment_to_target(i))
                .map(|s| s.length_m)
                .sum(),
        )
    }

    /// Get the number of points in the path
    pub fn get_num_points(&self) -> usize {
        self.points_m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points_m.is_empty()
    }
}

impl PathSegment {
    /// Distance from `point` to the line through this segment.
    ///
    /// For a zero length segment this is the distance to the target.
    pub fn lateral_error(&self, point: &Vector3<f64>) -> f64 {
        let rel = point - self.start_m;
        let along = rel.dot(&self.direction);

        (rel - self.direction * along).norm()
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Densify a closed loop of points.
///
/// Between every pair of neighbouring points `(p1, p2)`, including the pair
/// from the last point back to the first, `points_per_segment` points are
/// inserted at `t = j / (points_per_segment + 1)` for
/// `j = 1..=points_per_segment`, using `p1 + (p2 - p1) * t`.
///
/// The input points are kept in order, so the output has
/// `points.len() * (points_per_segment + 1)` points. Empty and single point
/// inputs are returned unchanged.
pub fn interpolate_path(points: &[Vector3<f64>], points_per_segment: usize) -> Vec<Vector3<f64>> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity(points.len() * (points_per_segment + 1));

    for (i, p1) in points.iter().enumerate() {
        let p2 = &points[(i + 1) % points.len()];

        out.push(*p1);

        for j in 1..=points_per_segment {
            let t = j as f64 / (points_per_segment + 1) as f64;
            out.push(p1 + (p2 - p1) * t);
        }
    }

    out
}
